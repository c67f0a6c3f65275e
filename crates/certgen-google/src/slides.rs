//! Template operations over Drive and Slides.

use certgen_model::ServiceResult;
use certgen_render::{DocumentId, ExportFormat, Substitution, TemplateService};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::client::GoogleClient;

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

fn copy_body(folder: &str, name: &str) -> Value {
    json!({
        "name": name,
        "parents": [folder],
    })
}

fn batch_update_body(substitutions: &[Substitution]) -> Value {
    let requests: Vec<Value> = substitutions
        .iter()
        .map(|substitution| {
            json!({
                "replaceAllText": {
                    "containsText": {
                        "text": substitution.token(),
                        "matchCase": true,
                    },
                    "replaceText": substitution.replacement,
                }
            })
        })
        .collect();
    json!({ "requests": requests })
}

impl TemplateService for GoogleClient {
    fn duplicate(
        &self,
        template: &DocumentId,
        folder: &str,
        name: &str,
    ) -> ServiceResult<DocumentId> {
        let url = Self::url(
            &self.endpoints().drive,
            &["files", template.as_str(), "copy"],
        )?;
        let copy: DriveFile = self.post_json(url, &copy_body(folder, name))?;
        debug!(template = %template, document = %copy.id, "template copied");
        Ok(DocumentId::new(copy.id))
    }

    fn replace_all_text(
        &self,
        document: &DocumentId,
        substitutions: &[Substitution],
    ) -> ServiceResult<()> {
        let action = format!("{}:batchUpdate", document.as_str());
        let url = Self::url(&self.endpoints().slides, &["presentations", &action])?;
        let _: Value = self.post_json(url, &batch_update_body(substitutions))?;
        Ok(())
    }

    fn export(&self, document: &DocumentId, format: ExportFormat) -> ServiceResult<Vec<u8>> {
        let mut url = Self::url(
            &self.endpoints().drive,
            &["files", document.as_str(), "export"],
        )?;
        url.query_pairs_mut()
            .append_pair("mimeType", format.mime_type());
        self.get_bytes(url)
    }

    fn trash(&self, document: &DocumentId) -> ServiceResult<()> {
        let url = Self::url(&self.endpoints().drive, &["files", document.as_str()])?;
        self.patch_json(url, &json!({ "trashed": true }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certgen_render::Placeholder;

    #[test]
    fn copy_places_duplicate_in_folder() {
        assert_eq!(
            copy_body("folder-1", "Asha - Certificate"),
            json!({"name": "Asha - Certificate", "parents": ["folder-1"]})
        );
    }

    #[test]
    fn batch_update_matches_case() {
        let body = batch_update_body(&[
            Substitution {
                placeholder: Placeholder::Name,
                replacement: "Asha".to_string(),
            },
            Substitution {
                placeholder: Placeholder::CertNumber,
                replacement: "CERT01".to_string(),
            },
        ]);
        let requests = body["requests"].as_array().expect("requests");
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0],
            json!({"replaceAllText": {
                "containsText": {"text": "{{Name}}", "matchCase": true},
                "replaceText": "Asha"
            }})
        );
        assert_eq!(
            requests[1]["replaceAllText"]["containsText"]["text"],
            "{{CERT-NUMBER}}"
        );
    }

    #[test]
    fn export_url_carries_mime_type() {
        let mut url = GoogleClient::url("https://www.googleapis.com/drive/v3", &["files", "d1", "export"])
            .expect("url");
        url.query_pairs_mut()
            .append_pair("mimeType", ExportFormat::Pdf.mime_type());
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/drive/v3/files/d1/export?mimeType=application%2Fpdf"
        );
    }
}
