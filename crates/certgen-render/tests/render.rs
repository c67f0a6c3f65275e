use std::cell::RefCell;

use certgen_model::{DateRange, ParticipantRecord, ServiceError, ServiceResult};
use certgen_render::{
    DocumentId, ExportFormat, RenderError, RenderStep, RunDates, Substitution, TemplateRenderer,
    TemplateService, format_readable_date, ordinal_suffix,
};
use chrono::NaiveDate;
use proptest::prelude::*;

const TEMPLATE_TEXT: &str = "{{Name}} of {{SchoolName}} completed {{WebinarName}} \
     from {{Date}} to {{Dateto}}. Certificate {{CERT-NUMBER}}. {{Name}}";

#[derive(Default)]
struct FakeSlides {
    fail_substitute: bool,
    fail_export: bool,
    text: RefCell<String>,
    calls: RefCell<Vec<String>>,
}

impl TemplateService for FakeSlides {
    fn duplicate(
        &self,
        template: &DocumentId,
        folder: &str,
        name: &str,
    ) -> ServiceResult<DocumentId> {
        self.calls
            .borrow_mut()
            .push(format!("duplicate {template} -> {folder} as {name}"));
        *self.text.borrow_mut() = TEMPLATE_TEXT.to_string();
        Ok(DocumentId::new("copy-1"))
    }

    fn replace_all_text(
        &self,
        document: &DocumentId,
        substitutions: &[Substitution],
    ) -> ServiceResult<()> {
        self.calls.borrow_mut().push(format!("replace {document}"));
        if self.fail_substitute {
            return Err(ServiceError::Api {
                status: 400,
                message: "bad request".to_string(),
            });
        }
        let mut text = self.text.borrow_mut();
        for sub in substitutions {
            *text = text.replace(sub.token(), &sub.replacement);
        }
        Ok(())
    }

    fn export(&self, document: &DocumentId, format: ExportFormat) -> ServiceResult<Vec<u8>> {
        self.calls
            .borrow_mut()
            .push(format!("export {document} {}", format.extension()));
        if self.fail_export {
            return Err(ServiceError::Network("reset".to_string()));
        }
        Ok(self.text.borrow().as_bytes().to_vec())
    }

    fn trash(&self, document: &DocumentId) -> ServiceResult<()> {
        self.calls.borrow_mut().push(format!("trash {document}"));
        Ok(())
    }
}

fn record() -> ParticipantRecord {
    ParticipantRecord {
        name: "Asha".to_string(),
        email: "a@x.com".to_string(),
        school: "ABC School".to_string(),
        domain: "Python".to_string(),
        certificate_number: "CERT01".to_string(),
    }
}

fn dates() -> RunDates {
    RunDates::new(&DateRange::new(
        NaiveDate::from_ymd_opt(2025, 6, 21).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 25).unwrap(),
    ))
}

#[test]
fn renders_and_replaces_every_token() {
    let slides = FakeSlides::default();
    let renderer = TemplateRenderer::new(&slides, "template-1", "folder-9");
    let dates = dates();
    let rendered = renderer
        .render(&record(), dates.as_formatted())
        .expect("render");

    assert_eq!(rendered.file_name, "Asha_CERT01.pdf");
    assert_eq!(rendered.mime_type, "application/pdf");
    let text = String::from_utf8(rendered.bytes).expect("utf8");
    assert_eq!(
        text,
        "Asha of ABC School completed Python from 21st June, 2025 to 25th June, 2025. \
         Certificate CERT01. Asha"
    );
    assert!(!text.contains("{{"));
    assert_eq!(
        slides.calls.borrow().as_slice(),
        [
            "duplicate template-1 -> folder-9 as Asha - Certificate",
            "replace copy-1",
            "export copy-1 pdf",
            "trash copy-1",
        ]
    );
}

#[test]
fn duplicate_is_trashed_when_substitution_fails() {
    let slides = FakeSlides {
        fail_substitute: true,
        ..FakeSlides::default()
    };
    let renderer = TemplateRenderer::new(&slides, "template-1", "folder-9");
    let dates = dates();
    let err = renderer.render(&record(), dates.as_formatted()).unwrap_err();
    assert_eq!(err.step(), RenderStep::Substitute);
    assert_eq!(slides.calls.borrow().last().unwrap(), "trash copy-1");
}

#[test]
fn duplicate_is_trashed_when_export_fails() {
    let slides = FakeSlides {
        fail_export: true,
        ..FakeSlides::default()
    };
    let renderer = TemplateRenderer::new(&slides, "template-1", "folder-9");
    let dates = dates();
    let err = renderer.render(&record(), dates.as_formatted()).unwrap_err();
    assert!(matches!(
        err,
        RenderError::Service {
            step: RenderStep::Export,
            ..
        }
    ));
    assert!(err.to_string().starts_with("failed to export document"));
    assert_eq!(slides.calls.borrow().last().unwrap(), "trash copy-1");
}

#[test]
fn suffix_table_for_every_day() {
    for day in 1..=31u32 {
        let expected = match day {
            1 | 21 | 31 => "st",
            2 | 22 => "nd",
            3 | 23 => "rd",
            _ => "th",
        };
        assert_eq!(ordinal_suffix(day), expected, "day {day}");
        let date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        assert!(format_readable_date(date).starts_with(&format!("{day}{expected} January")));
    }
    assert_eq!(ordinal_suffix(11), "th");
    assert_eq!(ordinal_suffix(21), "st");
    assert_eq!(ordinal_suffix(2), "nd");
}

proptest! {
    #[test]
    fn formatted_date_ends_with_year(y in 1900i32..2100, m in 1u32..=12, d in 1u32..=28) {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let text = format_readable_date(date);
        let expected_suffix = format!(", {}", y);
        prop_assert!(text.ends_with(&expected_suffix));
        prop_assert_eq!(format_readable_date(date), text);
    }
}
