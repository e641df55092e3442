use dynflow::{EncodedValues, RegistryError, WorkflowRegistry};

fn noop_builder_with(names: &[&str]) -> dynflow::WorkflowRegistryBuilder {
    names.iter().fold(WorkflowRegistry::builder(), |b, name| {
        b.register_fn(*name, |_args: EncodedValues| async move { Ok(String::new()) })
    })
}

#[test]
fn duplicate_registration_fails_at_build() {
    let err = noop_builder_with(&["Greet", "Transfer", "Greet"])
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateRegistration {
            names: vec!["Greet".to_string()],
        }
    );

    // Every colliding name is reported, not just the first
    let err = noop_builder_with(&["A", "A", "B", "B"]).build().unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateRegistration {
            names: vec!["A".to_string(), "B".to_string()],
        }
    );
}

#[test]
fn repeated_duplicate_is_reported_once() {
    let err = noop_builder_with(&["Greet", "Greet", "Greet", "Greet"])
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateRegistration {
            names: vec!["Greet".to_string()],
        }
    );
    assert_eq!(err.to_string(), "duplicate workflow registration: Greet");
}

#[test]
fn resolve_finds_every_registered_name() {
    let registry = noop_builder_with(&["Greet", "Transfer", "Refund"])
        .build()
        .unwrap();

    assert_eq!(registry.count(), 3);
    for name in ["Greet", "Transfer", "Refund"] {
        assert!(registry.has(name));
        // Each resolved factory produces a usable handler instance
        let factory = registry.resolve(name).unwrap();
        assert!(factory.create().is_ok());
    }

    let mut names = registry.list_names();
    names.sort();
    assert_eq!(names, ["Greet", "Refund", "Transfer"]);
}

#[test]
fn resolve_miss_reports_unknown_workflow_type() {
    let registry = noop_builder_with(&["Greet"]).build().unwrap();
    let err = registry.resolve("Missing").unwrap_err();
    assert!(err.is_unknown_workflow_type());
    assert!(!registry.has("Missing"));
}

#[test]
fn empty_registry_resolves_nothing() {
    let registry = WorkflowRegistry::default();
    assert_eq!(registry.count(), 0);
    assert!(registry.list_names().is_empty());
    assert!(registry.resolve("Anything").is_err());
}

#[tokio::test]
async fn registry_is_shared_read_only_across_clones() {
    let registry = noop_builder_with(&["Greet"]).build().unwrap();
    let clone = registry.clone();

    // Clones resolve against the same immutable table from separate tasks
    let handle = tokio::spawn(async move { clone.resolve("Greet").is_ok() });
    assert!(registry.resolve("Greet").is_ok());
    assert!(handle.await.unwrap());
}
