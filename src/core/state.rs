//! State reader — flatten the terraform state artifact into resource
//! records, one per (resource, instance) pair.
//!
//! A missing artifact is "no resources yet" and maps to `Ok(None)`.
//! A present-but-unparseable artifact is a distinct error kind so it
//! never masquerades as an empty inventory.

use crate::core::error::Error;
use crate::core::types::{ResourceRecord, NOT_AVAILABLE};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// The slice of the tfstate document this tool consumes; everything else
/// in the artifact is ignored. The shape is dictated by terraform.
#[derive(Debug, Deserialize)]
struct StateDoc {
    resources: Vec<StateResource>,
}

#[derive(Debug, Deserialize)]
struct StateResource {
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    #[serde(default)]
    instances: Vec<StateInstance>,
}

#[derive(Debug, Deserialize)]
struct StateInstance {
    #[serde(default)]
    attributes: serde_json::Map<String, Value>,
}

/// Read and flatten a state artifact.
///
/// - absent file: `Ok(None)`
/// - valid document: `Ok(Some(records))`, in document order
/// - unreadable or wrong shape: `Err(Error::UnreadableState)`
pub fn read_state(path: &Path) -> Result<Option<Vec<ResourceRecord>>, Error> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| Error::UnreadableState {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let doc: StateDoc =
        serde_json::from_str(&content).map_err(|e| Error::UnreadableState {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(Some(flatten(&doc)))
}

fn flatten(doc: &StateDoc) -> Vec<ResourceRecord> {
    let mut records = Vec::new();
    for resource in &doc.resources {
        for instance in &resource.instances {
            records.push(ResourceRecord {
                resource_type: resource.resource_type.clone(),
                name: resource.name.clone(),
                id: attr(&instance.attributes, "id"),
                cidr_block: attr(&instance.attributes, "cidr_block"),
            });
        }
    }
    records
}

/// Extract an attribute as text; absent or null keys map to the sentinel.
fn attr(attributes: &serde_json::Map<String, Value>, key: &str) -> String {
    match attributes.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => NOT_AVAILABLE.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_state(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("terraform.tfstate");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_absent_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_state(&dir.path().join("terraform.tfstate")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_single_vpc_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_state(
            dir.path(),
            r#"{"resources":[{"type":"aws_vpc","name":"main","instances":[{"attributes":{"id":"vpc-1","cidr_block":"10.0.0.0/16"}}]}]}"#,
        );
        let records = read_state(&path).unwrap().unwrap();
        assert_eq!(
            records,
            vec![ResourceRecord {
                resource_type: "aws_vpc".to_string(),
                name: "main".to_string(),
                id: "vpc-1".to_string(),
                cidr_block: "10.0.0.0/16".to_string(),
            }]
        );
    }

    #[test]
    fn test_n_resources_m_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_state(
            dir.path(),
            r#"{
              "resources": [
                {"type": "aws_subnet", "name": "a", "instances": [
                  {"attributes": {"id": "subnet-1", "cidr_block": "10.0.1.0/24"}},
                  {"attributes": {"id": "subnet-2", "cidr_block": "10.0.2.0/24"}}
                ]},
                {"type": "aws_vpc", "name": "main", "instances": [
                  {"attributes": {"id": "vpc-1", "cidr_block": "10.0.0.0/16"}}
                ]}
              ]
            }"#,
        );
        let records = read_state(&path).unwrap().unwrap();
        assert_eq!(records.len(), 3);
        // Document order preserved
        assert_eq!(records[0].id, "subnet-1");
        assert_eq!(records[1].id, "subnet-2");
        assert_eq!(records[2].id, "vpc-1");
    }

    #[test]
    fn test_missing_attribute_maps_to_sentinel_per_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_state(
            dir.path(),
            r#"{
              "resources": [
                {"type": "aws_instance", "name": "web", "instances": [
                  {"attributes": {"id": "i-1"}},
                  {"attributes": {"id": "i-2", "cidr_block": "10.0.3.0/24"}}
                ]}
              ]
            }"#,
        );
        let records = read_state(&path).unwrap().unwrap();
        assert_eq!(records[0].cidr_block, "N/A");
        assert_eq!(records[1].cidr_block, "10.0.3.0/24");
    }

    #[test]
    fn test_resource_without_instances_yields_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_state(
            dir.path(),
            r#"{"resources":[{"type":"aws_vpc","name":"empty"}]}"#,
        );
        let records = read_state(&path).unwrap().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_resource_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_state(dir.path(), r#"{"resources":[]}"#);
        let records = read_state(&path).unwrap().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_malformed_json_is_unreadable_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_state(dir.path(), "{not valid json");
        let err = read_state(&path).unwrap_err();
        assert!(matches!(err, Error::UnreadableState { .. }));
    }

    #[test]
    fn test_wrong_shape_is_unreadable_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_state(dir.path(), r#"{"version": 4}"#);
        let err = read_state(&path).unwrap_err();
        assert!(matches!(err, Error::UnreadableState { .. }));
    }

    #[test]
    fn test_non_string_attribute_rendered_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_state(
            dir.path(),
            r#"{"resources":[{"type":"aws_vpc","name":"n","instances":[{"attributes":{"id":42}}]}]}"#,
        );
        let records = read_state(&path).unwrap().unwrap();
        assert_eq!(records[0].id, "42");
    }

    #[test]
    fn test_null_attribute_maps_to_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_state(
            dir.path(),
            r#"{"resources":[{"type":"aws_vpc","name":"n","instances":[{"attributes":{"id":null}}]}]}"#,
        );
        let records = read_state(&path).unwrap().unwrap();
        assert_eq!(records[0].id, "N/A");
    }
}
