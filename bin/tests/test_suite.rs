use lazy_regex::regex;
use test_suite_proc_macro::generate_tests;

use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct Expectations {
    lisp: Option<String>,
    infix: Option<String>,
    polish: Option<String>,
    errors: Vec<String>,
}

impl Expectations {
    fn from_annotations(code: &str) -> Self {
        let mut expectations = Self::default();

        let error_regex = regex!(r"// (Error( at end| at '.*')?: .*)");
        let expect_regex = regex!(r"// expect: (.*)");
        let infix_regex = regex!(r"// infix: (.*)");
        let polish_regex = regex!(r"// polish: (.*)");

        for (i, line) in code.lines().enumerate() {
            if let Some(cap) = error_regex.captures(line) {
                expectations.errors.push(format!("[line {}] {}", i + 1, &cap[1]));
            } else if let Some(cap) = expect_regex.captures(line) {
                expectations.lisp = Some(cap[1].to_string());
            } else if let Some(cap) = infix_regex.captures(line) {
                expectations.infix = Some(cap[1].to_string());
            } else if let Some(cap) = polish_regex.captures(line) {
                expectations.polish = Some(cap[1].to_string());
            }
        }

        expectations
    }

    fn expects_output(&self) -> bool {
        self.lisp.is_some() || self.infix.is_some() || self.polish.is_some()
    }
}

pub fn expect_suite_file(code: &str) {
    let expected = Expectations::from_annotations(code);
    assert!(
        expected.expects_output() != !expected.errors.is_empty(),
        "A suite file expects either output or errors: {expected:?}"
    );

    match parser::parse_source(code) {
        Ok(expr) => {
            assert!(expected.errors.is_empty(), "Expected errors but none occurred");

            if let Some(lisp) = &expected.lisp {
                assert_eq!(&expr.to_string(), lisp);
            }
            if let Some(infix) = &expected.infix {
                assert_eq!(&printer::infix(&expr), infix);
            }
            if let Some(polish) = &expected.polish {
                assert_eq!(&printer::polish(&expr), polish);
            }
        }
        Err(diagnostics) => {
            assert!(!expected.expects_output(), "Unexpected errors:\n{diagnostics}");
            assert_eq!(diagnostics.to_string(), expected.errors.join("\n"));
        }
    }
}

generate_tests!();
