use serde::Deserialize;

pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Top-level JSON:API document. `data` is nullable on the wire.
#[derive(Debug, Deserialize)]
pub struct Document<T> {
    pub data: Option<ResourceObject<T>>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceObject<T> {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub attributes: Option<T>,
}

impl<T> Document<T> {
    pub fn into_attributes(self) -> Option<T> {
        self.data.and_then(|resource| resource.attributes)
    }
}

/// Body returned alongside non-2xx statuses.
#[derive(Debug, Deserialize, Default)]
pub struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ApiErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorObject {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorDocument {
    pub fn first_message(&self) -> Option<String> {
        self.errors
            .first()
            .and_then(|e| e.detail.clone().or_else(|| e.title.clone()))
            .filter(|m| !m.is_empty())
    }
}

/// Organization entitlement set. Only `operations` drives the remote ops decision.
///
/// `operations` stays `None` when the API omits it so callers can reject the payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Entitlements {
    #[serde(default)]
    pub operations: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub operations: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entitlements_document_deserialization() {
        let json = r#"{
            "data": {
                "id": "org-acme",
                "type": "entitlement-sets",
                "attributes": {
                    "operations": true,
                    "private-module-registry": true,
                    "sentinel": false,
                    "state-storage": true,
                    "teams": false,
                    "vcs-integrations": true,
                    "sso": false
                }
            }
        }"#;

        let doc: Document<Entitlements> = serde_json::from_str(json).unwrap();
        let resource = doc.data.as_ref().unwrap();
        assert_eq!(resource.id.as_deref(), Some("org-acme"));
        assert_eq!(resource.kind.as_deref(), Some("entitlement-sets"));

        let entitlements = doc.into_attributes().unwrap();
        assert_eq!(entitlements.operations, Some(true));
    }

    #[test]
    fn test_empty_attributes_leave_operations_unset() {
        let entitlements = serde_json::from_str::<Document<Entitlements>>(
            r#"{"data": {"attributes": {}}}"#,
        )
        .unwrap()
        .into_attributes()
        .unwrap();
        assert!(entitlements.operations.is_none());

        let ws = serde_json::from_str::<Document<Workspace>>(r#"{"data": {"attributes": {}}}"#)
            .unwrap()
            .into_attributes()
            .unwrap();
        assert!(ws.operations.is_none());
    }

    #[test]
    fn test_null_data_yields_no_attributes() {
        let doc: Document<Entitlements> = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(doc.into_attributes().is_none());
    }

    #[test]
    fn test_missing_data_yields_no_attributes() {
        let doc: Document<Workspace> = serde_json::from_str("{}").unwrap();
        assert!(doc.into_attributes().is_none());
    }

    #[test]
    fn test_workspace_deserialization_ignores_unknown_fields() {
        let json = r#"{
            "data": {
                "id": "ws-abc123",
                "type": "workspaces",
                "attributes": {
                    "name": "my-prod",
                    "operations": false,
                    "execution-mode": "local",
                    "auto-apply": false,
                    "terraform-version": "1.6.0"
                }
            }
        }"#;

        let ws = serde_json::from_str::<Document<Workspace>>(json)
            .unwrap()
            .into_attributes()
            .unwrap();
        assert_eq!(ws.operations, Some(false));
    }

    #[test]
    fn test_error_document_prefers_detail() {
        let json = r#"{"errors": [{"status": "401", "title": "unauthorized", "detail": "invalid token"}]}"#;
        let doc: ErrorDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.first_message().as_deref(), Some("invalid token"));
    }

    #[test]
    fn test_error_document_falls_back_to_title() {
        let json = r#"{"errors": [{"status": "404", "title": "not found"}]}"#;
        let doc: ErrorDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.first_message().as_deref(), Some("not found"));
    }

    #[test]
    fn test_error_document_empty() {
        assert!(ErrorDocument::default().first_message().is_none());
    }
}
