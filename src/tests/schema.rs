use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use crate::directory::tests::directory;
use crate::schema::{Dumper, Loader, SCHEMA_KEY};
use crate::store::tests::{Event, event_store};
use crate::{
    Field, FieldError, Grant, Group, HumanizedDate, Identifier, ModelField, ModelList,
    Principal, PrincipalField, PrincipalList, PrincipalPermissionList, PrincipalResolver, ResolvePolicy,
    StandardUnifier, User, scope_where,
};

struct Fields {
    event: ModelField<Event>,
    related: ModelList<Event>,
    speaker: PrincipalField,
    attendees: PrincipalList,
    acl: PrincipalPermissionList<Grant>,
    since: HumanizedDate,
}

fn fields() -> Fields {
    let resolver: Arc<dyn PrincipalResolver> = Arc::new(directory());
    Fields {
        event: ModelField::<Event>::builder(event_store())
            .scope(scope_where(|e: &Event| !e.deleted))
            .build()
            .unwrap(),
        related: ModelList::<Event>::builder(event_store())
            .column("slug")
            .build()
            .unwrap(),
        speaker: PrincipalField::new(Arc::clone(&resolver), ResolvePolicy::default()),
        attendees: PrincipalList::new(Arc::clone(&resolver), ResolvePolicy::groups()),
        acl: PrincipalPermissionList::new(resolver, Arc::new(StandardUnifier)),
        since: HumanizedDate::new(),
    }
}

#[test]
fn test_load_full_document() {
    let f = fields();
    let doc = json!({
        "event": 2,
        "related": ["kickoff", "retro", "kickoff"],
        "speaker": "User:1",
        "attendees": ["User:1", "Group:7", "user:1"],
        "acl": [["Group:ldap:admins", ["manage"]]],
        "since": "2024-01-15"
    });

    let mut loader = Loader::new(&doc).unwrap();
    let event = loader.field("event", &f.event).flatten();
    let related = loader.field("related", &f.related);
    let speaker = loader.field("speaker", &f.speaker).flatten();
    let attendees = loader.field("attendees", &f.attendees);
    let acl = loader.field("acl", &f.acl);
    let since = loader.field("since", &f.since);
    loader.finish().unwrap();

    assert_eq!(event.map(|e| e.slug), Some("review".to_string()));
    assert_eq!(related.map(|r| r.len()), Some(2));
    assert_eq!(speaker, Some(User::new("1").into()));
    assert_eq!(attendees.map(|a| a.len()), Some(2));
    let acl = acl.unwrap();
    assert_eq!(
        acl[&Principal::from(Group::provider("ldap", "admins"))],
        BTreeSet::from(["manage".to_string()])
    );
    assert_eq!(since, Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()));
}

#[test]
fn test_load_collects_every_failure() {
    let f = fields();
    let doc = json!({
        "event": 4,
        "related": ["kickoff", "nope"],
        "speaker": "Group:7",
        "attendees": "User:1",
        "since": "garbage"
    });

    let mut loader = Loader::new(&doc).unwrap();
    assert!(loader.field("event", &f.event).is_none());
    assert!(loader.field("related", &f.related).is_none());
    assert!(loader.field("speaker", &f.speaker).is_none());
    assert!(loader.field("attendees", &f.attendees).is_none());
    // missing key reads as null
    assert!(loader.field("acl", &f.acl).is_some_and(|acl| acl.is_empty()));
    assert!(loader.field("since", &f.since).is_none());
    assert!(loader.has_errors());

    let err = loader.finish().unwrap_err();
    let codes: Vec<(&str, &str)> = err
        .errors
        .iter()
        .map(|(name, entry)| (name.as_str(), entry.code.as_str()))
        .collect();
    assert_eq!(
        codes,
        vec![
            ("attendees", "type"),
            ("event", "not_found"),
            ("related", "not_found"),
            ("since", "parse"),
            ("speaker", "invalid"),
        ]
    );
    insta::assert_json_snapshot!(err, @r#"
    {
      "errors": {
        "attendees": {
          "code": "type",
          "message": "Invalid input type."
        },
        "event": {
          "code": "not_found",
          "message": "\"4\" does not exist"
        },
        "related": {
          "code": "not_found",
          "message": "\"nope\" does not exist"
        },
        "since": {
          "code": "parse",
          "message": "Can't parse humanized date!"
        },
        "speaker": {
          "code": "invalid",
          "message": "Group principals are not allowed here"
        }
      }
    }
    "#);
}

#[test]
fn test_loader_rejects_non_object() {
    let err = Loader::new(&json!([1, 2])).err().unwrap();
    assert_eq!(err.errors[SCHEMA_KEY].code, "type");
}

#[test]
fn test_dump_then_load_round_trips() {
    let f = fields();
    let event = f.event.deserialize(&json!(3)).unwrap();
    let attendees: Vec<Principal> = vec![User::new("2").into(), Group::local("7").into()];
    let grants = vec![Grant::new(User::new("1")).with_permission("submit")];

    let mut dumper = Dumper::new();
    dumper
        .field("event", &f.event, &event)
        .field("attendees", &f.attendees, &attendees)
        .field("acl", &f.acl, &grants);
    let doc = dumper.finish().unwrap();
    assert_eq!(
        doc,
        json!({
            "event": 3,
            "attendees": ["User:2", "Group:7"],
            "acl": [["User:1", ["submit"]]]
        })
    );

    let mut loader = Loader::new(&doc).unwrap();
    assert_eq!(loader.field("event", &f.event).flatten(), event);
    let loaded = loader.field("attendees", &f.attendees).unwrap();
    assert!(attendees.iter().all(|p| loaded.contains(p)));
    loader.finish().unwrap();
}

#[test]
fn test_dump_reports_unsupported_fields() {
    let f = fields();
    let now = Utc::now();
    let mut dumper = Dumper::new();
    dumper.field("since", &f.since, &now);
    let err = dumper.finish().unwrap_err();
    assert_eq!(err.errors["since"].code, "not_implemented");
}

#[test]
fn test_model_round_trip_for_every_record() {
    let f = fields();
    for id in 1..=3 {
        let record = f.event.deserialize(&json!(id)).unwrap();
        let wire = f.event.serialize(&record).unwrap();
        assert_eq!(wire, Value::from(id));
        assert_eq!(f.event.deserialize(&wire).unwrap(), record);
    }
}

#[test]
fn test_missing_identifier_carries_value() {
    let f = fields();
    assert_eq!(
        f.related.deserialize(&json!(["retro", "gone"])),
        Err(FieldError::NotFound {
            value: Identifier::from("gone")
        })
    );
}
