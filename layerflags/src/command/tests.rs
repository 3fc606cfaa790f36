//! Unit tests for command dispatch.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};

use super::{Command, CommandState};
use crate::flag::Handle;
use crate::value::Scalar;
use crate::{Environment, FlagError, FlagSpec, ParseOptions};

type Calls = Rc<RefCell<Vec<String>>>;

struct Tree {
    root: Command,
    verbose: Handle<Scalar<bool>>,
    times: Handle<Scalar<i64>>,
    calls: Calls,
}

/// `root [-v] repeat [-n times] <arg>` plus an exec-less `noop` child.
#[fixture]
fn tree() -> Tree {
    let calls: Calls = Rc::default();
    let mut root_cmd = Command::new("root").usage("root [-v] <subcommand>");
    let verbose = root_cmd
        .flags_mut()
        .bool(FlagSpec::default().short('v').long("verbose"))
        .expect("register verbose");

    let mut repeat_cmd = Command::new("repeat").usage("repeat [-n times] <arg>");
    let times = repeat_cmd
        .flags_mut()
        .int(FlagSpec::default().short('n'), 3)
        .expect("register n");
    let log = Rc::clone(&calls);
    let repeat = repeat_cmd.exec(move |inv| {
        let is_verbose = inv.get(&verbose).is_some_and(|v| *v.get());
        let n = inv.get(&times).map_or(0, |v| *v.get());
        log.borrow_mut().push(format!(
            "{} v={is_verbose} n={n} args={:?}",
            inv.command(),
            inv.args()
        ));
        Ok(())
    });

    let root_log = Rc::clone(&calls);
    let root = root_cmd
        .subcommand(repeat)
        .subcommand(Command::new("noop"))
        .exec(move |inv| {
            root_log.borrow_mut().push(format!("root args={:?}", inv.args()));
            Ok(())
        });
    Tree {
        root,
        verbose,
        times,
        calls,
    }
}

#[rstest]
fn dispatches_to_the_named_subcommand(mut tree: Tree) {
    tree.root
        .parse_and_run(["-v", "repeat", "-n", "5", "hello"], &ParseOptions::new())
        .expect("dispatch succeeds");

    assert_eq!(tree.root.flags().get(&tree.verbose).map(|v| *v.get()), Some(true));
    let repeat = tree.root.selected();
    assert_eq!(repeat.name(), "repeat");
    assert_eq!(repeat.flags().get(&tree.times).map(|v| *v.get()), Some(5));
    assert_eq!(repeat.state(), CommandState::Terminal);
    assert_eq!(tree.root.state(), CommandState::Delegated(0));
    assert_eq!(*tree.calls.borrow(), [r#"repeat v=true n=5 args=["hello"]"#]);
}

#[rstest]
#[case("REPEAT")]
#[case("Repeat")]
fn matches_subcommands_ignoring_case(mut tree: Tree, #[case] name: &str) {
    tree.root
        .parse([name, "x"], &ParseOptions::new())
        .expect("parse succeeds");
    assert_eq!(tree.root.selected().name(), "repeat");
}

#[rstest]
fn unmatched_positional_stays_with_the_parent(mut tree: Tree) {
    tree.root
        .parse_and_run(["-v", "unknown", "repeat"], &ParseOptions::new())
        .expect("root exec runs");
    assert_eq!(tree.root.selected().name(), "root");
    assert_eq!(*tree.calls.borrow(), [r#"root args=["unknown", "repeat"]"#]);
}

#[rstest]
fn terminal_without_exec_is_no_exec(mut tree: Tree) {
    let err = tree
        .root
        .parse_and_run(["noop"], &ParseOptions::new())
        .expect_err("noop has nothing to run");
    assert!(err.is_no_exec());
    assert!(matches!(err, FlagError::NoExec { command } if command == "noop"));
}

#[rstest]
fn run_before_parse_is_rejected(mut tree: Tree) {
    assert!(matches!(
        tree.root.run(),
        Err(FlagError::NotParsed { command }) if command == "root"
    ));
}

#[rstest]
fn subcommand_flags_are_not_parsed_by_the_parent(mut tree: Tree) {
    assert!(matches!(
        tree.root.parse(["-n", "5", "repeat"], &ParseOptions::new()),
        Err(FlagError::UnknownFlag { name }) if name == "n"
    ));
}

#[rstest]
fn ancestor_flags_are_not_parsed_by_the_child(mut tree: Tree) {
    assert!(matches!(
        tree.root.parse(["repeat", "-v"], &ParseOptions::new()),
        Err(FlagError::UnknownFlag { name }) if name == "v"
    ));
}

#[rstest]
fn environment_reaches_every_node(mut tree: Tree) {
    // `-n` has no long name, so only its short name can be derived.
    let options = ParseOptions::new()
        .env_prefix("ROOT")
        .env_short_names(true)
        .environment(Environment::from_pairs([("ROOT_VERBOSE", "true"), ("ROOT_N", "7")]));
    tree.root
        .parse_and_run(["repeat", "hi"], &options)
        .expect("dispatch succeeds");
    assert_eq!(*tree.calls.borrow(), [r#"repeat v=true n=7 args=["hi"]"#]);
}

#[test]
fn duplicate_names_across_the_chain_are_rejected() {
    let mut parent = Command::new("root");
    parent
        .flags_mut()
        .bool(FlagSpec::default().short('v'))
        .expect("register v");
    let mut child = Command::new("child");
    child
        .flags_mut()
        .bool(FlagSpec::default().short('v').long("version"))
        .expect("register child v");
    let mut root = parent.subcommand(child);
    assert!(matches!(
        root.parse(["child"], &ParseOptions::new()),
        Err(FlagError::DuplicateFlag { name, set }) if name == "v" && set == "child"
    ));
}

#[rstest]
fn run_after_a_failed_child_parse_is_rejected(mut tree: Tree) {
    assert!(tree.root.parse(["repeat", "--bogus"], &ParseOptions::new()).is_err());
    assert_eq!(tree.root.state(), CommandState::Delegated(0));
    assert!(matches!(
        tree.root.run(),
        Err(FlagError::NotParsed { command }) if command == "repeat"
    ));
    assert!(tree.calls.borrow().is_empty());
}

#[test]
fn run_after_a_failed_postparse_is_rejected() {
    let ran = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&ran);
    let mut root = Command::new("root")
        .postparse(|_| Err("rejected".into()))
        .exec(move |_| {
            *flag.borrow_mut() = true;
            Ok(())
        });
    assert!(root.parse(Vec::<String>::new(), &ParseOptions::new()).is_err());
    assert!(matches!(root.run(), Err(FlagError::NotParsed { .. })));
    assert!(!*ran.borrow());
}

#[test]
fn postparse_failure_stops_dispatch() {
    let mut root = Command::new("root")
        .postparse(|inv| {
            if inv.args().first().is_some_and(|arg| arg == "forbidden") {
                return Err("forbidden subcommand".into());
            }
            Ok(())
        })
        .subcommand(Command::new("forbidden").exec(|_| Ok(())));
    let err = root
        .parse(["forbidden"], &ParseOptions::new())
        .expect_err("hook rejects");
    assert!(matches!(err, FlagError::Postparse { ref command, .. } if command == "root"));
    assert_eq!(err.to_string(), "root: forbidden subcommand");
    assert_eq!(root.state(), CommandState::FlagsParsed);
    assert_eq!(
        root.subcommands().first().map(Command::state),
        Some(CommandState::Unparsed)
    );
}

#[test]
fn exec_failures_are_wrapped_with_the_command_name() {
    let mut root = Command::new("root").exec(|_| Err("boom".into()));
    let err = root
        .parse_and_run(Vec::<String>::new(), &ParseOptions::new())
        .expect_err("exec fails");
    assert!(matches!(err, FlagError::Exec { ref command, .. } if command == "root"));
    assert_eq!(err.to_string(), "root: boom");
}

#[rstest]
fn help_requests_surface_from_any_depth(mut tree: Tree) {
    let err = tree
        .root
        .parse(["repeat", "--help"], &ParseOptions::new())
        .expect_err("help requested");
    assert!(err.is_help_request());
}

#[rstest]
fn reset_allows_a_second_dispatch(mut tree: Tree) {
    let options = ParseOptions::new();
    tree.root
        .parse_and_run(["repeat", "-n", "9", "a"], &options)
        .expect("first dispatch");
    assert!(matches!(
        tree.root.parse(["repeat", "b"], &options),
        Err(FlagError::AlreadyParsed { .. })
    ));
    tree.root.reset();
    assert_eq!(tree.root.state(), CommandState::Unparsed);
    tree.root
        .parse_and_run(["repeat", "b"], &options)
        .expect("second dispatch");
    assert_eq!(
        *tree.calls.borrow(),
        [
            r#"repeat v=false n=9 args=["a"]"#,
            r#"repeat v=false n=3 args=["b"]"#,
        ]
    );
}

#[rstest]
fn selected_path_lists_every_delegation(mut tree: Tree) {
    tree.root
        .parse(["repeat"], &ParseOptions::new())
        .expect("parse succeeds");
    let names: Vec<_> = tree.root.selected_path().into_iter().map(Command::name).collect();
    assert_eq!(names, ["root", "repeat"]);
}

#[test]
fn unnamed_subcommands_are_rejected_at_dispatch() {
    let mut root = Command::new("root").subcommand(Command::new(""));
    assert!(matches!(
        root.parse(["x"], &ParseOptions::new()),
        Err(FlagError::InvalidFlag { .. })
    ));
}
