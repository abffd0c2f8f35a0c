use quote::{format_ident, quote};

/// Expands to one `#[test]` per `.lox` file under `bin/tests/suite`, each calling
/// `expect_suite_file` with the file's content.
#[proc_macro]
pub fn generate_tests(_: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let suite_dir = format!("{}/../suite", env!("CARGO_MANIFEST_DIR"));
    let mut files = walkdir::WalkDir::new(&suite_dir)
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension() == Some("lox".as_ref()))
        .map(|entry| entry.into_path())
        .collect::<Vec<_>>();
    files.sort();

    let tests = files.iter().map(|path| {
        let test_file_path = path.to_string_lossy();
        let relative_test_path = path.strip_prefix(&suite_dir).unwrap().to_string_lossy();
        let test_ident = format_ident!(
            "suite_{}",
            relative_test_path.replace(['/', '-', '.'], "_").trim_end_matches("_lox")
        );
        quote! {
            #[test]
            fn #test_ident() {
                expect_suite_file(std::fs::read_to_string(#test_file_path).unwrap().as_str());
            }
        }
    });

    quote! {
        #[ctor::ctor]
        fn init() {
            let _ = env_logger::builder().is_test(true).try_init();
        }

        #(#tests)*
    }
    .into()
}
