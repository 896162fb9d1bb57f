use super::fixture_loader::{
    FixtureCase, FixtureFailure, FixtureResult, TestCase, load_cases, to_params,
};
/// Fixture runner
///
/// Builds a `QueryUrl` per case, applies its mutations and compares outputs.
use query_url::QueryUrl;

fn build(case: &FixtureCase) -> query_url::Result<QueryUrl> {
    let mut builder = QueryUrl::builder()
        .url(case.input.as_deref())
        .secure(case.secure);
    if let Some(current) = &case.current {
        builder = builder.current_url(current.clone());
    }
    if let Some(parameters) = &case.parameters {
        builder = builder.parameters(to_params(parameters));
    }
    builder.build()
}

fn check(
    result: &mut FixtureResult,
    test_num: usize,
    case: &FixtureCase,
    field: &str,
    expected: String,
    actual: String,
) -> bool {
    if expected == actual {
        return true;
    }
    result.failures.push(FixtureFailure {
        test_num,
        input: case.input.clone(),
        field: field.to_string(),
        expected,
        actual,
    });
    false
}

/// Run fixture cases and return results
pub fn run_fixture_tests(tests: Vec<TestCase>) -> FixtureResult {
    let mut result = FixtureResult::default();
    let mut test_num = 0;

    for test in tests {
        let TestCase::QueryUrlTest(case) = test else {
            continue;
        };
        test_num += 1;

        if case.failure == Some(true) {
            let passed = check(
                &mut result,
                test_num,
                &case,
                "parsing",
                "failure".to_string(),
                if build(&case).is_ok() { "success" } else { "failure" }.to_string(),
            );
            if passed {
                result.passed += 1;
            } else {
                result.failed += 1;
            }
            continue;
        }

        let mut url = match build(&case) {
            Ok(url) => url,
            Err(err) => {
                check(
                    &mut result,
                    test_num,
                    &case,
                    "parsing",
                    "success".to_string(),
                    err.to_string(),
                );
                result.failed += 1;
                continue;
            }
        };

        if let Some(set) = &case.set {
            url.set_parameters(to_params(set));
        }
        url.remove_parameters(case.remove.iter().map(String::as_str));
        if let Some(path) = &case.path {
            url.set_path(path);
        }
        if let Some(fragment) = &case.fragment {
            url.set_fragment(fragment);
        }

        let mut test_passed = true;

        if let Some(expected) = &case.href {
            test_passed &= check(
                &mut result,
                test_num,
                &case,
                "href",
                expected.clone(),
                url.build_url(),
            );
        }

        if let Some(expected) = &case.relative {
            test_passed &= check(
                &mut result,
                test_num,
                &case,
                "relative",
                expected.clone(),
                url.build_relative_url(),
            );
        }

        if let Some(expected) = &case.expected {
            test_passed &= check(
                &mut result,
                test_num,
                &case,
                "parameters",
                format!("{:?}", to_params(expected)),
                format!("{:?}", url.parameters()),
            );
        }

        if test_passed {
            result.passed += 1;
        } else {
            result.failed += 1;
        }
    }

    result
}

#[test]
fn test_query_url_fixtures() {
    let result = run_fixture_tests(load_cases());

    println!("\n=== Query URL fixture results ===");
    println!("{}", result.summary());

    if !result.failures.is_empty() {
        println!("\nFailures:");
        for failure in result.failures.iter().take(20) {
            println!(
                "  #{} {:?} [{}]\n    expected: {}\n    actual:   {}",
                failure.test_num, failure.input, failure.field, failure.expected, failure.actual
            );
        }
    }

    assert_eq!(result.failed, 0, "{}", result.summary());
}
