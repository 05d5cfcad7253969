use std::sync::{Arc, Mutex};
use subcmd::{CmdFunc, Command, DispatchError, FlagSet, ParsedFlags, Registry};

struct Deploy {
    runs: Arc<Mutex<Vec<Vec<String>>>>,
}

impl Command for Deploy {
    fn flags(&self, flags: &mut FlagSet) {
        flags.bool("v", false, "verbose");
    }

    fn run(&self, _flags: &ParsedFlags, args: &[String]) -> anyhow::Result<()> {
        self.runs.lock().unwrap().push(args.to_vec());
        Ok(())
    }
}

fn populated(names: &[&str]) -> Registry {
    let mut registry = Registry::new();
    for name in names {
        registry.add(*name, "desc", CmdFunc::new(|_args: &[String]| Ok(())));
    }
    registry
}

#[test]
fn any_unregistered_name_is_no_such_command() {
    let registry = populated(&["init", "status", "commit"]);
    for name in ["push", "pull", "INIT", "stat", "commit2"] {
        let err = registry.dispatch(&[name, "--flag", "x"]).unwrap_err();
        assert!(matches!(err, DispatchError::NoSuchCommand { .. }), "{}", name);
        assert!(err.command().is_none());
    }
}

#[test]
fn empty_registry_is_usage_for_any_arguments() {
    let registry = Registry::new();
    let cases: [&[&str]; 4] = [&[], &["init"], &["-h"], &["a", "b", "c"]];
    for args in cases {
        assert!(matches!(registry.dispatch(args), Err(DispatchError::Usage)));
    }
}

#[test]
fn required_v_missing_then_supplied() {
    let runs = Arc::new(Mutex::new(Vec::new()));
    let mut registry = Registry::new();
    registry.register("deploy", "desc", Deploy { runs: Arc::clone(&runs) }, ["v"]);

    let err = registry.dispatch(&["deploy"]).unwrap_err();
    assert_eq!(err.missing_flags().unwrap(), ["v".to_string()]);

    registry.dispatch(&["deploy", "-v", "one", "two"]).unwrap();
    assert_eq!(*runs.lock().unwrap(), [vec!["one".to_string(), "two".to_string()]]);
}

#[test]
fn second_registration_is_the_one_dispatched() {
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));
    let mut registry = Registry::new();
    registry.add("deploy", "one", Deploy { runs: Arc::clone(&first) });
    registry.add("deploy", "two", Deploy { runs: Arc::clone(&second) });

    let entry = registry.dispatch(&["deploy"]).unwrap();
    assert_eq!(entry.description(), "two");
    assert!(first.lock().unwrap().is_empty());
    assert_eq!(second.lock().unwrap().len(), 1);
}
