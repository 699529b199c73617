//! Inline validation and submission flow

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::json;
use tracing::{info, warn};

use super::{SiteController, Task};
use crate::dom::{Dom, NodeId};
use crate::error::SubmitError;
use crate::forms::{validate_value, FormSubmission, SUBMIT_FAILED_MESSAGE};
use crate::host::Host;

const REQUIRED_FIELDS: &str = "input[required], textarea[required]";
const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;
const SUCCESS_REVERT: Duration = Duration::from_secs(3);
const ERROR_DISPLAY: Duration = Duration::from_secs(5);

impl<D: Dom, H: Host> SiteController<D, H> {
    pub(super) fn setup_form_validation(&mut self) {
        self.bindings.forms = self.dom.query_selector_all("form");
        for form in self.bindings.forms.clone() {
            let fields = self.dom.query_all_within(form, REQUIRED_FIELDS);
            self.bindings.validated_fields.extend(fields);
        }
    }

    /// Validate one field, showing or clearing its inline error
    pub fn validate_field(&mut self, field: NodeId) -> bool {
        let field_type = if self.dom.tag_name(field) == "input" {
            self.dom.attribute(field, "type").unwrap_or_else(|| "text".to_string())
        } else {
            self.dom.tag_name(field)
        };
        match validate_value(&self.dom.value(field), &field_type) {
            None => {
                self.clear_field_error(field);
                true
            }
            Some(message) => {
                self.show_field_error(field, message);
                false
            }
        }
    }

    fn show_field_error(&mut self, field: NodeId, message: &str) {
        self.clear_field_error(field);
        self.dom.add_class(field, "border-red-500");
        if let Some(parent) = self.dom.parent(field) {
            self.append_element(parent, "div", "text-red-500 text-sm mt-1 field-error", Some(message));
        }
    }

    pub(super) fn clear_field_error(&mut self, field: NodeId) {
        self.dom.remove_class(field, "border-red-500");
        let error = self
            .dom
            .parent(field)
            .and_then(|parent| self.dom.query_within(parent, ".field-error"));
        if let Some(error) = error {
            self.dom.remove(error);
        }
    }

    /// Intercept a form submission; returns whether the default was prevented
    pub fn on_submit(&mut self, form: NodeId, now: Duration) -> bool {
        if !self.bindings.forms.contains(&form) {
            return false;
        }
        let mut valid = true;
        for field in self.dom.query_all_within(form, REQUIRED_FIELDS) {
            valid &= self.validate_field(field);
        }
        if valid {
            self.submit_form(form, now);
        }
        true
    }

    fn submit_form(&mut self, form: NodeId, now: Duration) {
        let submission = self.collect_submission(form);
        if let Some(button) = self.dom.query_within(form, SUBMIT_BUTTON) {
            self.dom.set_attribute(button, "disabled", "");
            self.set_button_content(button, "marine-spinner w-4 h-4 mr-2", "Submitting...");
        }
        self.state.is_loading = true;

        let pending = self.transport.submit(&submission);
        self.timers.schedule(
            now + pending.settle_after,
            Task::SettleSubmission {
                form,
                outcome: pending.outcome,
            },
        );
    }

    fn collect_submission(&self, form: NodeId) -> FormSubmission {
        let mut fields = BTreeMap::new();
        for control in self.dom.query_all_within(form, "input[name], textarea[name], select[name]") {
            let kind = self.dom.attribute(control, "type").unwrap_or_default().to_ascii_lowercase();
            if matches!(kind.as_str(), "submit" | "button" | "reset" | "image" | "file") {
                continue;
            }
            let value = if matches!(kind.as_str(), "checkbox" | "radio") {
                if self.dom.attribute(control, "checked").is_none() {
                    continue;
                }
                self.dom.attribute(control, "value").unwrap_or_else(|| "on".to_string())
            } else {
                self.dom.value(control)
            };
            if let Some(name) = self.dom.attribute(control, "name") {
                fields.insert(name, value);
            }
        }
        FormSubmission {
            form_id: self.dom.attribute(form, "id"),
            fields,
        }
    }

    pub(super) fn settle_submission(&mut self, form: NodeId, outcome: Result<(), SubmitError>, at: Duration) {
        self.state.is_loading = false;
        match outcome {
            Ok(()) => {
                self.show_form_success(form, at);
                let form_id = self.dom.attribute(form, "id").unwrap_or_else(|| "unknown".to_string());
                let page = self.state.page.as_str();
                info!(form = %form_id, "Form submitted");
                self.track("form_submit", json!({ "form": form_id, "page": page }));
            }
            Err(e) => {
                warn!("Form submission failed: {}", e);
                self.show_form_error(form, SUBMIT_FAILED_MESSAGE, at);
            }
        }
    }

    fn show_form_success(&mut self, form: NodeId, at: Duration) {
        if let Some(button) = self.dom.query_within(form, SUBMIT_BUTTON) {
            self.dom.remove_attribute(button, "disabled");
            self.set_button_content(button, "fas fa-check mr-2", "Thank you!");
            self.swap_class(button, "btn-marine-primary", "success-marine");
            self.timers
                .schedule(at + SUCCESS_REVERT, Task::RevertSubmitButton { button });
        }
        self.reset_form(form);
    }

    pub(super) fn revert_submit_button(&mut self, button: NodeId) {
        self.dom.set_text(button, "Submit");
        self.swap_class(button, "success-marine", "btn-marine-primary");
    }

    fn show_form_error(&mut self, form: NodeId, message: &str, at: Duration) {
        if let Some(button) = self.dom.query_within(form, SUBMIT_BUTTON) {
            self.dom.remove_attribute(button, "disabled");
            self.dom.set_text(button, "Submit");
        }
        if let Some(existing) = self.dom.query_within(form, ".form-error") {
            self.dom.remove(existing);
        }
        let error = self.append_element(form, "div", "error-marine form-error mt-4 text-center", Some(message));
        self.timers.schedule(at + ERROR_DISPLAY, Task::RemoveNode { node: error });
    }

    /// Icon followed by a label
    fn set_button_content(&mut self, button: NodeId, icon_class: &str, label: &str) {
        self.dom.set_text(button, "");
        self.append_element(button, "i", icon_class, None);
        let text = self.dom.create_text_node(label);
        self.dom.append_child(button, text);
    }

    fn swap_class(&mut self, node: NodeId, from: &str, to: &str) {
        if self.dom.has_class(node, from) {
            self.dom.remove_class(node, from);
            self.dom.add_class(node, to);
        }
    }

    fn reset_form(&mut self, form: NodeId) {
        for control in self.dom.query_all_within(form, "input, textarea, select") {
            let default = if self.dom.tag_name(control) == "textarea" {
                self.dom.text(control)
            } else {
                self.dom.attribute(control, "value").unwrap_or_default()
            };
            self.dom.set_value(control, &default);
        }
    }
}
