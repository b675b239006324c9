use proptest::prelude::*;
use serde_json::{json, Map, Value};
use stackvars::{
    ConfigurationError, Converted, Kind, Params, ResourceFactory, TargetType, TemplateType,
    TypedResourceAdapter,
};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::support::{Bucket, FixtureError, SecurityGroup, Tag};

static PROBE_BUILDS: AtomicUsize = AtomicUsize::new(0);

/// Resource that counts factory calls; used only by the optional test.
#[derive(Debug)]
struct Probe;

impl TemplateType for Probe {
    type Error = FixtureError;

    fn validate_props(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl ResourceFactory for Probe {
    const RESOURCE_TYPE: &'static str = "Custom::Probe";

    fn from_dict(_title: &str, _params: &Params) -> Result<Self, Self::Error> {
        PROBE_BUILDS.fetch_add(1, Ordering::SeqCst);
        Ok(Probe)
    }
}

fn security_groups_many() -> TypedResourceAdapter<SecurityGroup> {
    TypedResourceAdapter::many(TargetType::resource()).unwrap()
}

fn groups_with_titles(titles: &[&str]) -> Value {
    let mut value = Map::new();
    for title in titles {
        value.insert(title.to_string(), json!({"GroupDescription": title}));
    }
    Value::Object(value)
}

#[test]
fn optional_absent_values_skip_the_factory() {
    let adapter = TypedResourceAdapter::<Probe>::optional(TargetType::resource()).unwrap();
    for value in [json!(null), json!({}), json!(""), json!([])] {
        assert_eq!(adapter.create(&value).unwrap().len(), 0);
    }
    assert_eq!(PROBE_BUILDS.load(Ordering::SeqCst), 0);

    let created = adapter.create(&json!({"p": {}})).unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(PROBE_BUILDS.load(Ordering::SeqCst), 1);
}

#[test]
fn many_and_optional_conflict_for_every_kind() {
    let resource = TypedResourceAdapter::new(TargetType::<SecurityGroup>::resource(), true, true);
    let property = TypedResourceAdapter::new(TargetType::<Tag>::property(), true, true);
    assert!(matches!(resource, Err(ConfigurationError::ConflictingOptions { .. })));
    assert!(matches!(property, Err(ConfigurationError::ConflictingOptions { .. })));
}

#[test]
fn types_without_factory_are_rejected() {
    for (many, optional) in [(false, false), (true, false), (false, true)] {
        let err = TypedResourceAdapter::new(TargetType::<Tag>::named("Widget"), many, optional)
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingFactory { ref type_name } if type_name == "Widget"));
    }
}

#[test]
fn resource_name_falls_back_to_type_name() {
    let bucket = TypedResourceAdapter::single(TargetType::<Bucket>::resource()).unwrap();
    assert_eq!(bucket.resource_name(), "S3Bucket");
    let group = TypedResourceAdapter::single(TargetType::<SecurityGroup>::resource()).unwrap();
    assert_eq!(group.resource_name(), "SecurityGroup");
    let renamed = TypedResourceAdapter::single(
        TargetType::<SecurityGroup>::resource().with_resource_name("Firewall"),
    )
    .unwrap();
    assert_eq!(renamed.resource_name(), "Firewall");
}

#[test]
fn single_resource_returns_titled_instance() {
    let adapter = TypedResourceAdapter::single(TargetType::<SecurityGroup>::resource()).unwrap();
    assert_eq!(adapter.kind(), Kind::Resource);
    let created = adapter
        .create(&json!({"title1": {"GroupDescription": "web"}}))
        .unwrap();
    assert_eq!(
        created,
        Converted::One(SecurityGroup {
            title: "title1".to_string(),
            description: Some("web".to_string()),
        })
    );
}

#[test]
fn single_resource_rejects_multiple_titles() {
    let adapter = TypedResourceAdapter::single(TargetType::<SecurityGroup>::resource()).unwrap();
    let err = adapter
        .create(&json!({"a": {"GroupDescription": "x"}, "b": {"GroupDescription": "y"}}))
        .unwrap_err();
    assert!(matches!(
        err.configuration(),
        Some(ConfigurationError::TooManyResources { .. })
    ));
}

#[test]
fn resources_require_a_mapping() {
    let adapter = security_groups_many();
    for value in [json!([{"GroupDescription": "x"}]), json!("sg"), json!(null)] {
        let err = adapter.create(&value).unwrap_err();
        assert!(matches!(
            err.configuration(),
            Some(ConfigurationError::ResourceShape { .. })
        ));
    }
}

#[test]
fn many_resources_keep_input_order() {
    let created = security_groups_many()
        .create(&json!({"b": {"GroupDescription": "2"}, "a": {"GroupDescription": "1"}}))
        .unwrap();
    let titles: Vec<String> = created.into_vec().into_iter().map(|g| g.title).collect();
    assert_eq!(titles, vec!["b", "a"]);
}

#[test]
fn wrapped_type_errors_are_not_translated() {
    let adapter = security_groups_many();

    let factory_err = adapter
        .create(&json!({"a": {"GroupDescription": "x", "Bogus": 1}}))
        .unwrap_err();
    assert_eq!(
        factory_err.invalid(),
        Some(&FixtureError::Unexpected("Bogus".to_string()))
    );

    let validation_err = adapter.create(&json!({"a": {}})).unwrap_err();
    assert_eq!(
        validation_err.invalid(),
        Some(&FixtureError::Required("a".to_string(), "GroupDescription"))
    );
    assert_eq!(validation_err.to_string(), "a: required property GroupDescription missing");
}

#[test]
fn single_property_accepts_a_mapping_only() {
    let adapter = TypedResourceAdapter::single(TargetType::<Tag>::property()).unwrap();
    assert_eq!(adapter.kind(), Kind::Property);

    let created = adapter.create(&json!({"k": "v"})).unwrap().into_one().unwrap();
    assert_eq!(created.key, "v");

    let err = adapter.create(&json!([{"k": "v"}])).unwrap_err();
    assert!(matches!(
        err.configuration(),
        Some(ConfigurationError::PropertyShape { .. })
    ));
}

#[test]
fn single_property_rejects_empty_mapping() {
    let adapter = TypedResourceAdapter::single(TargetType::<Tag>::property()).unwrap();
    let err = adapter.create(&json!({})).unwrap_err();
    assert!(matches!(
        err.configuration(),
        Some(ConfigurationError::EmptyValue { .. })
    ));
}

#[test]
fn many_properties_accept_a_sequence_only() {
    let adapter = TypedResourceAdapter::many(TargetType::<Tag>::property()).unwrap();

    let created = adapter
        .create(&json!([{"k": "v"}, {"k": "v2"}]))
        .unwrap();
    let keys: Vec<String> = created.into_vec().into_iter().map(|t| t.key).collect();
    assert_eq!(keys, vec!["v", "v2"]);

    let err = adapter.create(&json!({"k": "v"})).unwrap_err();
    assert!(matches!(
        err.configuration(),
        Some(ConfigurationError::PropertyListShape { .. })
    ));
}

#[test]
fn adapters_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TypedResourceAdapter<Tag>>();

    let adapter = std::sync::Arc::new(security_groups_many());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let adapter = std::sync::Arc::clone(&adapter);
            std::thread::spawn(move || {
                let title = format!("g{}", i);
                let value = groups_with_titles(&[title.as_str()]);
                adapter.create(&value).unwrap().into_vec()[0].title == title
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

proptest! {
    #[test]
    fn many_resources_preserve_arbitrary_title_order(
        titles in proptest::collection::hash_set("[A-Za-z][A-Za-z0-9]{0,11}", 1..8)
    ) {
        let titles: Vec<String> = titles.into_iter().collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let created = security_groups_many().create(&groups_with_titles(&refs)).unwrap();
        let got: Vec<String> = created.into_vec().into_iter().map(|g| g.title).collect();
        prop_assert_eq!(got, titles);
    }

    #[test]
    fn optional_single_resource_round_trips_its_title(title in "[A-Za-z][A-Za-z0-9]{0,11}") {
        let adapter = TypedResourceAdapter::<SecurityGroup>::optional(TargetType::resource()).unwrap();
        let created = adapter
            .create(&groups_with_titles(&[title.as_str()]))
            .unwrap();
        prop_assert_eq!(created.into_one().map(|g| g.title), Some(title));
    }
}
