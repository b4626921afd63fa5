use super::*;
use crate::{run, run_with_config, Outcome};

fn output_of(input: &str) -> String {
    let outcome = run(input);
    assert_eq!(outcome.error, None, "program failed: {}", input);
    outcome.output
}

fn error_of(input: &str) -> String {
    run(input).error.expect("expected the program to fail")
}

#[test]
fn test_documented_programs() {
    let cases = vec![
        ("vaippu x = 5\nkaattu x", "5\n"),
        ("vaippu a = 2\nkaattu \"Val: \" + a", "Val: 2\n"),
        (
            "endraal poi { kaattu \"no\" } illai endraal unmai { kaattu \"yes\" } illai { kaattu \"never\" }",
            "yes\n",
        ),
        (
            "vaippu i = 1\nthirumba i <= 3 { kaattu i\ni = i + 1 }",
            "1\n2\n3\n",
        ),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }
}

#[test]
fn test_undeclared_name() {
    assert_eq!(
        run("kaattu y"),
        Outcome {
            output: "".to_owned(),
            error: Some("NameError at line 1: 'y' is not defined".to_owned()),
        }
    );
}

#[test]
fn test_eval_number_expression() {
    let cases = vec![
        ("kaattu 5", "5"),
        ("kaattu -10", "-10"),
        ("kaattu 5 + 5 + 5 + 5 - 10", "10"),
        ("kaattu 2 * 2 * 2 * 2 * 2", "32"),
        ("kaattu -50 + 100 + -50", "0"),
        ("kaattu 20 + 2 * -10", "0"),
        ("kaattu 50 / 2 * 2 + 10", "60"),
        ("kaattu (5 + 10 * 2 + 15 / 3) * 2 + -10", "50"),
        ("kaattu 7 / 2", "3.5"),
        ("kaattu 7 % 3", "1"),
        ("kaattu 0.1 + 0.2", "0.30000000000000004"),
        ("kaattu .5 * 4", "2"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), format!("{}\n", expected), "{}", input);
    }
}

#[test]
fn test_eval_boolean_expression() {
    let cases = vec![
        ("unmai", "unmai"),
        ("poi", "poi"),
        ("1 < 2", "unmai"),
        ("1 > 2", "poi"),
        ("1 <= 1", "unmai"),
        ("1 >= 2", "poi"),
        ("1 == 1", "unmai"),
        ("1 != 1", "poi"),
        ("unmai == unmai", "unmai"),
        ("unmai != poi", "unmai"),
        ("(1 < 2) == unmai", "unmai"),
        ("!unmai", "poi"),
        ("!!poi", "poi"),
        ("\"a\" < \"b\"", "unmai"),
        ("\"abc\" == \"abc\"", "unmai"),
        ("1 == \"1\"", "poi"),
        ("1 != \"1\"", "unmai"),
        ("unmai == 1", "poi"),
        ("[1, 2] == [1, 2]", "unmai"),
        ("agarathi {\"a\": 1} == agarathi {\"a\": 1}", "unmai"),
        ("neelam == neelam", "unmai"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(
            output_of(&format!("kaattu {}", input)),
            format!("{}\n", expected),
            "{}",
            input
        );
    }
}

#[test]
fn test_string_concatenation() {
    let cases = vec![
        ("kaattu \"Vanakkam! \" + \"Tamil Nadu\"", "Vanakkam! Tamil Nadu\n"),
        ("kaattu \"Age: \" + 25", "Age: 25\n"),
        ("kaattu 2.5 + \" kg\"", "2.5 kg\n"),
        ("kaattu \"flag: \" + unmai", "flag: unmai\n"),
        ("kaattu \"list: \" + [1, \"a\"]", "list: [1, \"a\"]\n"),
        (
            "vaippu name = \"Tamil\"\nvaippu greeting = \"Vanakkam\"\nkaattu greeting + \" \" + name + \"!\"",
            "Vanakkam Tamil!\n",
        ),
        ("kaattu \"🎉 \" + 1", "🎉 1\n"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }
}

#[test]
fn test_conditionals() {
    let program = "vaippu score = 85
vaippu grade = \"\"

endraal score >= 90 {
    grade = \"A+\"
} illai endraal score >= 80 {
    grade = \"A\"
} illai {
    grade = \"Need Improvement\"
}
kaattu \"Grade: \" + grade";

    assert_eq!(output_of(program), "Grade: A\n");

    let cases = vec![
        ("endraal unmai { kaattu 10 }", "10\n"),
        ("endraal poi { kaattu 10 }", ""),
        ("endraal 1 < 2 { kaattu 10 } illai { kaattu 20 }", "10\n"),
        ("endraal 1 > 2 { kaattu 10 } illai { kaattu 20 }", "20\n"),
        (
            "endraal poi { kaattu 1 } illai endraal poi { kaattu 2 } illai { kaattu 3 }",
            "3\n",
        ),
        (
            "endraal unmai { kaattu 1 } illai endraal unmai { kaattu 2 }",
            "1\n",
        ),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }
}

#[test]
fn test_scoping() {
    let cases = vec![
        // bare assignment mutates the enclosing binding
        (
            "vaippu counter = 1\nthirumba counter <= 3 {\n  counter = counter + 1\n}\nkaattu counter",
            "4\n",
        ),
        // vaippu inside a block shadows
        (
            "vaippu x = 1\nendraal unmai {\n  vaippu x = 2\n  kaattu x\n}\nkaattu x",
            "2\n1\n",
        ),
        // names first assigned inside a block stay in that block
        (
            "endraal unmai { fresh = 1 }\nkaattu neelam([1])",
            "1\n",
        ),
        ("{ vaippu inner = 1 }\nkaattu 2", "2\n"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }

    assert_eq!(
        error_of("endraal unmai { fresh = 1 }\nkaattu fresh"),
        "NameError at line 2: 'fresh' is not defined"
    );
}

#[test]
fn test_for_loops() {
    let cases = vec![
        ("foru x in [1, 2, 3] { kaattu x * 10 }", "10\n20\n30\n"),
        (
            "foru k in agarathi {\"b\": 1, \"a\": 2} { kaattu k }",
            "b\na\n",
        ),
        ("foru c in \"abc\" { kaattu c }", "a\nb\nc\n"),
        ("foru i in varambu(0, 3) { kaattu i }", "0\n1\n2\n"),
        ("foru x in [] { kaattu x }", ""),
        (
            "vaippu total = 0\nforu n in [1, 2, 3, 4] { total = total + n }\nkaattu total",
            "10\n",
        ),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }

    assert_eq!(
        error_of("foru x in [1] { }\nkaattu x"),
        "NameError at line 2: 'x' is not defined"
    );
    assert_eq!(
        error_of("foru x in 5 { kaattu x }"),
        "TypeError at line 1: cannot iterate over NUMBER"
    );
}

#[test]
fn test_functions() {
    let cases = vec![
        (
            "seyal add(a, b) { thiruppu a + b }\nkaattu add(1, 2)",
            "3\n",
        ),
        (
            "seyal identity(x) { x }\nkaattu identity(5)",
            "nil\n",
        ),
        (
            "seyal early(x) {\n  endraal x > 0 { thiruppu \"positive\" }\n  thiruppu \"other\"\n}\nkaattu early(1)\nkaattu early(-1)",
            "positive\nother\n",
        ),
        (
            "seyal fact(n) {\n  endraal n <= 1 { thiruppu 1 }\n  thiruppu n * fact(n - 1)\n}\nkaattu fact(10)",
            "3628800\n",
        ),
        (
            "seyal fib(n) {\n  endraal n < 2 { thiruppu n }\n  thiruppu fib(n - 1) + fib(n - 2)\n}\nkaattu fib(15)",
            "610\n",
        ),
        (
            "seyal is_even(n) {\n  endraal n == 0 { thiruppu unmai }\n  thiruppu is_odd(n - 1)\n}\nseyal is_odd(n) {\n  endraal n == 0 { thiruppu poi }\n  thiruppu is_even(n - 1)\n}\nkaattu is_even(10)",
            "unmai\n",
        ),
        (
            "seyal find(xs, target) {\n  foru x in xs {\n    endraal x == target { thiruppu \"found\" }\n  }\n  thiruppu \"missing\"\n}\nkaattu find([1, 2, 3], 2)",
            "found\n",
        ),
        (
            "seyal loop_return() {\n  vaippu i = 0\n  thirumba unmai {\n    i = i + 1\n    endraal i == 3 { thiruppu i }\n  }\n}\nkaattu loop_return()",
            "3\n",
        ),
        ("seyal hello() { kaattu \"hi\" }\nhello()", "hi\n"),
        ("seyal f() { }\nkaattu f", "<seyal f>\n"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }
}

#[test]
fn test_closures() {
    let cases = vec![
        (
            "seyal make_adder(x) {\n  seyal adder(y) { thiruppu x + y }\n  thiruppu adder\n}\nvaippu add_two = make_adder(2)\nkaattu add_two(3)",
            "5\n",
        ),
        (
            "seyal counter() {\n  vaippu count = 0\n  seyal next() {\n    count = count + 1\n    thiruppu count\n  }\n  thiruppu next\n}\nvaippu c = counter()\nc()\nc()\nkaattu c()",
            "3\n",
        ),
        // lexical, not dynamic: the caller's `x` is invisible to `show`
        (
            "vaippu x = \"global\"\nseyal show() { thiruppu x }\nseyal caller() {\n  vaippu x = \"local\"\n  thiruppu show()\n}\nkaattu caller()",
            "global\n",
        ),
        (
            "seyal apply(f, v) { thiruppu f(v) }\nseyal double(n) { thiruppu n * 2 }\nkaattu apply(double, 21)",
            "42\n",
        ),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }
}

#[test]
fn test_function_identity() {
    let cases = vec![
        ("seyal f() { }\nvaippu g = f\nkaattu f == g", "unmai\n"),
        ("seyal f() { }\nseyal g() { }\nkaattu f == g", "poi\n"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }
}

#[test]
fn test_collections() {
    let cases = vec![
        ("kaattu [1, 2 * 2, 3 + 3]", "[1, 4, 6]\n"),
        ("kaattu listu [\"a\", unmai]", "[\"a\", unmai]\n"),
        ("kaattu [1, 2, 3][0]", "1\n"),
        ("kaattu [1, 2, 3][1 + 1]", "3\n"),
        ("vaippu xs = [1, 2, 3]\nkaattu xs[2] + xs[0]", "4\n"),
        ("kaattu \"தமிழ்\"[0]", "த\n"),
        (
            "vaippu d = agarathi {\"name\": \"Tamil\", \"age\": 25}\nkaattu d[\"name\"]\nkaattu d",
            "Tamil\n{\"name\": \"Tamil\", \"age\": 25}\n",
        ),
        (
            "vaippu xs = [1, 2]\nxs[0] = 10\nkaattu xs",
            "[10, 2]\n",
        ),
        (
            "vaippu d = agarathi {}\nd[\"b\"] = 1\nd[\"a\"] = 2\nd[\"b\"] = 3\nkaattu d",
            "{\"b\": 3, \"a\": 2}\n",
        ),
        (
            "vaippu grid = [[0, 0], [0, 0]]\ngrid[1][0] = 5\nkaattu grid",
            "[[0, 0], [5, 0]]\n",
        ),
        (
            "vaippu xs = [1]\nvaippu ys = xs\nys[0] = 2\nkaattu xs\nkaattu ys",
            "[1]\n[2]\n",
        ),
        (
            "vaippu xs = [1]\nendraal unmai { xs[0] = 9 }\nkaattu xs",
            "[9]\n",
        ),
        ("kaattu [1] + [2, 3]", "[1, 2, 3]\n"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }
}

#[test]
fn test_builtin_functions() {
    let cases = vec![
        ("kaattu neelam(\"vanakkam\")", "8\n"),
        ("kaattu neelam([1, 2, 3])", "3\n"),
        ("kaattu seru([1], 2)", "[1, 2]\n"),
        ("kaattu thoguppu([1, 2, 3.5])", "6.5\n"),
        ("kaattu ezhuthu(42) + \"!\"", "42!\n"),
        ("kaattu ennam(\"40\") + 2", "42\n"),
        ("kaattu kanakku_math(\"sqrt\", 81)", "9\n"),
        ("seyal neelam(x) { thiruppu \"mine\" }\nkaattu neelam(1)", "mine\n"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }
}

#[test]
fn test_error_handling() {
    let cases = vec![
        ("kaattu 5 + unmai", "TypeError at line 1: unsupported operand types: NUMBER + BOOLEAN"),
        ("kaattu \"a\" - \"b\"", "TypeError at line 1: unsupported operand types: STRING - STRING"),
        ("kaattu -unmai", "TypeError at line 1: unsupported operand type for -: BOOLEAN"),
        ("kaattu !5", "TypeError at line 1: unsupported operand type for !: NUMBER"),
        ("kaattu 1 < \"2\"", "TypeError at line 1: unsupported operand types: NUMBER < STRING"),
        ("endraal 1 { kaattu 1 }", "TypeError at line 1: condition must be unmai or poi, got NUMBER"),
        ("thirumba \"yes\" { }", "TypeError at line 1: condition must be unmai or poi, got STRING"),
        ("kaattu 1 / 0", "ZeroDivisionError at line 1: division by zero"),
        ("kaattu 1 % 0", "ZeroDivisionError at line 1: division by zero"),
        (
            "seyal add(a, b) { thiruppu a + b }\nkaattu add(1)",
            "ArityError at line 2: add expects 2 argument(s), got 1",
        ),
        ("kaattu neelam(1, 2)", "ArityError at line 1: neelam expects 1 argument(s), got 2"),
        ("kaattu neelam(5)", "TypeError at line 1: argument to `neelam` not supported, got NUMBER"),
        ("kaattu ennam(\"x\")", "RuntimeError at line 1: ennam: cannot convert \"x\" to a number"),
        ("vaippu x = 5\nx()", "TypeError at line 2: not a function: NUMBER"),
        ("kaattu [1, 2][2]", "IndexError at line 1: index 2 out of range for length 2"),
        ("kaattu [1, 2][-1]", "IndexError at line 1: index -1 out of range for length 2"),
        ("kaattu [1, 2][0.5]", "TypeError at line 1: index must be a whole number, got 0.5"),
        ("kaattu [1, 2][\"a\"]", "TypeError at line 1: index must be NUMBER, got STRING"),
        ("kaattu agarathi {\"a\": 1}[\"b\"]", "KeyError at line 1: key \"b\" not found"),
        ("kaattu agarathi {\"a\": 1}[1]", "TypeError at line 1: dictionary keys must be STRING, got NUMBER"),
        ("kaattu agarathi {1: 1}", "TypeError at line 1: dictionary keys must be STRING, got NUMBER"),
        ("kaattu 5[0]", "TypeError at line 1: index operator not supported: NUMBER"),
        ("vaippu xs = [1]\nxs[3] = 1", "IndexError at line 2: index 3 out of range for length 1"),
        ("ys[0] = 1", "NameError at line 1: 'ys' is not defined"),
        ("vaippu n = 1\nn[0] = 1", "TypeError at line 2: index assignment not supported: NUMBER"),
        ("vaippu d = agarathi {}\nd[\"a\"][\"b\"] = 1", "KeyError at line 2: key \"a\" not found"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(error_of(input), expected, "{}", input);
    }
}

#[test]
fn test_error_lines_inside_functions() {
    let program = "seyal divide(a, b) {
  thiruppu a / b
}
kaattu \"start\"
kaattu divide(1, 0)";

    assert_eq!(
        run(program),
        Outcome {
            output: "start\n".to_owned(),
            error: Some("ZeroDivisionError at line 2: division by zero".to_owned()),
        }
    );

    // the caller's line is restored once the call returns
    assert_eq!(
        error_of("seyal one() {\n  thiruppu 1\n}\nkaattu one() + unmai"),
        "TypeError at line 4: unsupported operand types: NUMBER + BOOLEAN"
    );
}

#[test]
fn test_partial_output_is_kept() {
    let outcome = run("kaattu 1\nkaattu 2\nkaattu missing\nkaattu 3");
    assert_eq!(outcome.output, "1\n2\n");
    assert_eq!(
        outcome.error,
        Some("NameError at line 3: 'missing' is not defined".to_owned())
    );
}

#[test]
fn test_static_errors_produce_no_output() {
    let cases = vec![
        ("kaattu 1\nkaattu \"open", "LexError at line 2: unterminated string literal"),
        ("kaattu 1\nvaippu = 2", "ParseError at line 2: expected identifier, found '='"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(
            run(input),
            Outcome {
                output: "".to_owned(),
                error: Some(expected.to_owned()),
            }
        );
    }
}

#[test]
fn test_step_limit() {
    let config = Config::default().with_step_limit(50);
    let outcome = run_with_config(
        "vaippu i = 0\nthirumba unmai {\n  kaattu i\n  i = i + 1\n}",
        config,
    );

    assert_eq!(
        outcome.error,
        Some("RuntimeError at line 2: execution step limit of 50 exceeded".to_owned())
    );
    assert!(outcome.output.starts_with("0\n1\n2\n"));

    let empty_loop = run_with_config("thirumba unmai { }", config);
    assert_eq!(
        empty_loop.error,
        Some("RuntimeError at line 1: execution step limit of 50 exceeded".to_owned())
    );

    let finishes = run_with_config("foru x in [1, 2, 3] { kaattu x }", config);
    assert_eq!(finishes.error, None);
}

#[test]
fn test_depth_limit() {
    let config = Config::default().with_max_depth(16);
    let outcome = run_with_config(
        "seyal forever(n) {\n  thiruppu forever(n + 1)\n}\nforever(0)",
        config,
    );

    assert_eq!(
        outcome.error,
        Some("RuntimeError at line 2: maximum call depth of 16 exceeded".to_owned())
    );
}

#[test]
fn test_runs_are_deterministic() {
    let programs = vec![
        "vaippu xs = [3, 1, 2]\nforu x in xs { kaattu x * x }",
        "seyal f(n) { thiruppu n + 1 }\nkaattu f(1)\nkaattu g",
        "vaippu d = agarathi {\"z\": 1, \"a\": 2, \"m\": 3}\nforu k in d { kaattu k + \"=\" + d[k] }",
    ];

    for program in programs.into_iter() {
        assert_eq!(run(program), run(program));
    }
}

#[test]
fn test_runs_do_not_share_state() {
    assert_eq!(output_of("vaippu shared = 1\nkaattu shared"), "1\n");
    assert_eq!(
        error_of("kaattu shared"),
        "NameError at line 1: 'shared' is not defined"
    );
}

#[test]
fn test_interpreter_keeps_globals_between_runs() {
    let mut interpreter = Interpreter::new();
    interpreter
        .run("seyal square(x) { thiruppu x * x }")
        .expect("first run failed");
    interpreter.run("kaattu square(4)").expect("second run failed");

    assert_eq!(interpreter.output(), "16\n");
    assert_eq!(interpreter.take_output(), "16\n");
    assert_eq!(interpreter.output(), "");
}

#[test]
fn test_register_native() {
    fn irandu(args: Vec<Value>) -> std::result::Result<Value, NativeError> {
        match args.as_slice() {
            [Value::Number(n)] => Ok(Value::Number(n * 2.0)),
            [other] => Err(NativeError::UnsupportedArgType {
                type_name: other.type_name(),
            }),
            _ => Err(NativeError::IncorrectArity {
                got: args.len(),
                want: 1,
            }),
        }
    }

    let mut interpreter = Interpreter::new();
    interpreter.register_native("irandu", irandu);
    interpreter.run("kaattu irandu(21)").expect("run failed");
    assert_eq!(interpreter.output(), "42\n");

    let err = interpreter.run("kaattu irandu(\"x\")").unwrap_err();
    assert_eq!(
        err.to_string(),
        "TypeError at line 1: argument to `irandu` not supported, got STRING"
    );
}

#[test]
fn test_sample_program() {
    let program = r#"// Welcome to Tanglish
karuthu "Tamil Programming Example"

vaippu vayathu = 25
vaippu peyargal = "Tamil Nadu"
vaippu unmai_poi irandu_peranbu = unmai

kaattu "Vanakkam! " + peyargal
kaattu "Age: " + vayathu

endraal vayathu >= 18 {
    kaattu "🎉 You are eligible to vote!"
} illai {
    kaattu "📚 Keep learning and growing!"
}

endraal irandu_peranbu == unmai {
    kaattu "✨ Truth prevails!"
}

# Simple loop demonstration
vaippu counter = 1
thirumba counter <= 3 {
    kaattu "Count: " + counter
    counter = counter + 1
}"#;

    assert_eq!(
        output_of(program),
        "Vanakkam! Tamil Nadu\nAge: 25\n🎉 You are eligible to vote!\n✨ Truth prevails!\nCount: 1\nCount: 2\nCount: 3\n"
    );
}

#[test]
fn test_nested_tamil_strings_print_unchanged() {
    let cases = vec![
        ("kaattu [\"தமிழ்\"]", "[\"தமிழ்\"]\n"),
        (
            "kaattu agarathi {\"மொழி\": \"தமிழ்\"}",
            "{\"மொழி\": \"தமிழ்\"}\n",
        ),
        ("kaattu [\"a\\\"b\"]", "[\"a\\\"b\"]\n"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }
}

static SUM: &str = "seyal sum(n) {
  endraal n == 0 { thiruppu 0 }
  thiruppu n + sum(n - 1)
}
";

#[test]
fn test_deep_recursion() {
    assert_eq!(output_of(&format!("{}kaattu sum(900)", SUM)), "405450\n");

    let outcome = run_with_config(
        &format!("{}kaattu sum(4000)", SUM),
        Config::default().with_max_depth(5000),
    );
    assert_eq!(outcome.error, None);
    assert_eq!(outcome.output, "8002000\n");

    assert_eq!(
        error_of(&format!("{}kaattu sum(1000)", SUM)),
        "RuntimeError at line 3: maximum call depth of 1000 exceeded"
    );
}

#[test]
fn test_deeply_nested_expression() {
    let depth = 5000;
    let source = format!("kaattu {}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(output_of(&source), "1\n");
}

#[test]
fn test_drop_frees_inner_function_scopes() {
    let mut interpreter = Interpreter::new();
    interpreter
        .run("seyal helper() {\n  seyal inner() { thiruppu 1 }\n  thiruppu inner\n}\nvaippu g = helper()\n{\n  seyal local() { }\n}")
        .expect("run failed");

    let scope = match interpreter.env.borrow().get("g") {
        Some(Value::Function(func)) => Rc::downgrade(&func.env),
        other => panic!("expected a function, got {:?}", other),
    };
    assert!(scope.upgrade().is_some());

    drop(interpreter);
    assert!(scope.upgrade().is_none());
}

#[test]
fn test_else_if_condition_errors_report_their_own_line() {
    let cases = vec![
        (
            "vaippu x = 1\nendraal x == 2 {\n  kaattu \"two\"\n} illai endraal missing {\n  kaattu \"?\"\n}",
            "NameError at line 4: 'missing' is not defined",
        ),
        (
            "endraal poi {\n} illai endraal poi {\n} illai endraal 5 {\n}",
            "TypeError at line 3: condition must be unmai or poi, got NUMBER",
        ),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(error_of(input), expected, "{}", input);
    }
}

#[test]
fn test_range_length_is_capped() {
    assert_eq!(
        run("kaattu 1\nvaippu xs = varambu(0, 1000000000000)"),
        Outcome {
            output: "1\n".to_owned(),
            error: Some(
                "RuntimeError at line 2: varambu: range of 0 to 1000000000000 is longer than 1000000 elements"
                    .to_owned()
            ),
        }
    );
    assert_eq!(
        output_of("kaattu neelam(varambu(0, 1000000))"),
        "1000000\n"
    );
}

#[test]
fn test_indexing_bound_variables() {
    let cases = vec![
        (
            "vaippu xs = varambu(0, 1000)\nvaippu total = 0\nforu i in varambu(0, 1000) { total = total + xs[i] }\nkaattu total",
            "499500\n",
        ),
        ("vaippu xs = [2, 0, 1]\nkaattu xs[xs[0]]", "1\n"),
        ("vaippu s = \"தமிழ்\"\nkaattu s[1]", "ம\n"),
        (
            "vaippu d = agarathi {\"k\": [1, 2]}\nkaattu d[\"k\"][1]",
            "2\n",
        ),
        (
            "vaippu xs = [1]\nseyal grow() {\n  xs = [1, 2, 3]\n  thiruppu 2\n}\nkaattu xs[grow()]",
            "3\n",
        ),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(output_of(input), expected, "{}", input);
    }

    let cases = vec![
        ("vaippu xs = [1, 2]\nkaattu xs[5]", "IndexError at line 2: index 5 out of range for length 2"),
        ("vaippu d = agarathi {}\nkaattu d[\"k\"]", "KeyError at line 2: key \"k\" not found"),
        ("kaattu nothing[0]", "NameError at line 1: 'nothing' is not defined"),
        ("kaattu neelam[0]", "TypeError at line 1: index operator not supported: BUILTIN"),
    ];

    for (input, expected) in cases.into_iter() {
        assert_eq!(error_of(input), expected, "{}", input);
    }
}
