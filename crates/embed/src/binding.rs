//! Attribute-driven bindings between page elements and queries.
//!
//! Responsibilities:
//! - Scan a [`Document`] once for `data-api-query`, `data-api-action` and
//!   `data-api-form` elements.
//! - Drive the auto-load, button-click and form-submit flows against an
//!   [`EmbedClient`], including the disabled/label state of the trigger.
//!
//! Does NOT handle:
//! - Event dispatch. Hosts call [`BindingSet::click`] / [`BindingSet::submit`]
//!   when the page reports the interaction.
//! - The attributes in [`UNSUPPORTED_ATTRIBUTES`]; they are logged and ignored.
//!
//! Invariants:
//! - A trigger is re-enabled and relabelled after its query, whatever the outcome.
//! - Every element carrying `data-api-query` auto-loads unless
//!   `data-auto-load="false"`, including buttons and forms.

use futures::future::join_all;
use serde_json::Value;
use tracing::debug;

use crate::client::EmbedClient;
use crate::dom::{Document, ElementId};
use crate::error::Result;
use crate::options::QueryOptions;
use crate::render::{RenderOptions, show_data, show_error};

pub const ATTR_QUERY: &str = "data-api-query";
pub const ATTR_ACTION: &str = "data-api-action";
pub const ATTR_FORM: &str = "data-api-form";
pub const ATTR_TARGET: &str = "data-target";
pub const ATTR_CONNECTION_ID: &str = "data-connection-id";
pub const ATTR_TEMPLATE: &str = "data-template";
pub const ATTR_AUTO_LOAD: &str = "data-auto-load";
pub const ATTR_ORIGINAL_TEXT: &str = "data-original-text";

pub const LOADING_LABEL: &str = "Loading...";
pub const PROCESSING_LABEL: &str = "Processing...";
pub const DEFAULT_BUTTON_LABEL: &str = "Query API";
pub const SUBMIT_LABEL: &str = "Submit";

/// Attributes page authors may write that have no behaviour.
pub const UNSUPPORTED_ATTRIBUTES: &[&str] = &[
    "data-api-limit",
    "data-api-cache",
    "data-api-refresh",
    "data-api-condition",
    "data-api-error",
    "data-api-retry",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    AutoLoad,
    ActionButton,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingDescriptor {
    pub attribute: &'static str,
    pub kind: BindingKind,
}

pub const BINDING_DESCRIPTORS: &[BindingDescriptor] = &[
    BindingDescriptor {
        attribute: ATTR_QUERY,
        kind: BindingKind::AutoLoad,
    },
    BindingDescriptor {
        attribute: ATTR_ACTION,
        kind: BindingKind::ActionButton,
    },
    BindingDescriptor {
        attribute: ATTR_FORM,
        kind: BindingKind::Form,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub element: ElementId,
    pub kind: BindingKind,
}

/// Scans documents and produces [`BindingSet`]s.
#[derive(Debug, Clone, Default)]
pub struct Binder {
    render: RenderOptions,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Collect bindings in document order and record each action button's
    /// label in `data-original-text`.
    pub fn bind(&self, document: &mut Document) -> BindingSet {
        let mut bindings = Vec::new();
        for descriptor in BINDING_DESCRIPTORS {
            for element in document.elements_with_attribute(descriptor.attribute) {
                bindings.push(Binding {
                    element,
                    kind: descriptor.kind,
                });
            }
        }
        bindings.sort_by_key(|b| b.element);

        for binding in bindings.iter().filter(|b| b.kind == BindingKind::ActionButton) {
            let el = &mut document[binding.element];
            let label = el.text().to_string();
            el.set_attribute(ATTR_ORIGINAL_TEXT, label);
        }

        for id in document.descendants(document.root()) {
            for attr in UNSUPPORTED_ATTRIBUTES {
                if document[id].has_attribute(attr) {
                    debug!(attribute = attr, "Ignoring unsupported embed attribute");
                }
            }
        }

        debug!(count = bindings.len(), "Bound embed elements");
        BindingSet {
            bindings,
            render: self.render,
        }
    }
}

/// Work to do for one auto-load element.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoLoadRequest {
    pub element: ElementId,
    pub query: String,
    pub options: QueryOptions,
    pub template: Option<String>,
}

/// A click or submit whose trigger is in its busy state.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    pub trigger: ElementId,
    /// The element whose label was changed; the submit button for forms.
    pub busy: Option<ElementId>,
    pub target: Option<ElementId>,
    pub query: String,
    pub options: QueryOptions,
    kind: BindingKind,
}

#[derive(Debug, Clone)]
pub struct BindingSet {
    bindings: Vec<Binding>,
    render: RenderOptions,
}

fn connection_options(document: &Document, element: ElementId) -> QueryOptions {
    QueryOptions {
        connection_id: document[element]
            .attribute(ATTR_CONNECTION_ID)
            .filter(|id| !id.trim().is_empty())
            .map(Into::into),
        skip_cache: false,
    }
}

/// `data-target` if set, else the next sibling.
fn resolve_target(document: &Document, element: ElementId) -> Result<Option<ElementId>> {
    match document[element].attribute(ATTR_TARGET) {
        Some(selector) => document.query_selector(selector),
        None => Ok(document.next_sibling(element)),
    }
}

impl BindingSet {
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn of_kind(&self, kind: BindingKind) -> impl Iterator<Item = ElementId> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.kind == kind)
            .map(|b| b.element)
    }

    pub fn auto_load_requests(&self, document: &Document) -> Vec<AutoLoadRequest> {
        self.of_kind(BindingKind::AutoLoad)
            .filter(|id| document[*id].attribute(ATTR_AUTO_LOAD) != Some("false"))
            .filter_map(|id| {
                let el = &document[id];
                let query = el.attribute(ATTR_QUERY)?.to_string();
                Some(AutoLoadRequest {
                    element: id,
                    query,
                    options: connection_options(document, id),
                    template: el.attribute(ATTR_TEMPLATE).map(str::to_string),
                })
            })
            .collect()
    }

    /// Run every auto-load query concurrently and render each result into
    /// its own element.
    pub async fn run_auto_load(&self, client: &EmbedClient, document: &mut Document) {
        let requests = self.auto_load_requests(document);
        let results = join_all(
            requests
                .iter()
                .map(|req| client.query(&req.query, &req.options)),
        )
        .await;
        for (req, result) in requests.iter().zip(results) {
            let el = &mut document[req.element];
            match result {
                Ok(data) => show_data(el, &data, req.template.as_deref(), &self.render),
                Err(err) => show_error(el, &err.to_string(), &self.render),
            }
        }
    }

    /// Put a `data-api-action="query"` button into its loading state.
    ///
    /// Returns `None` for other actions or a blank query; nothing changes.
    pub fn begin_action(&self, document: &mut Document, button: ElementId) -> Result<Option<PendingAction>> {
        let el = &document[button];
        if el.attribute(ATTR_ACTION) != Some("query") {
            return Ok(None);
        }
        let Some(query) = el.attribute(ATTR_QUERY).filter(|q| !q.is_empty()) else {
            return Ok(None);
        };
        let query = query.to_string();
        let target = resolve_target(document, button)?;
        let options = connection_options(document, button);

        let el = &mut document[button];
        el.set_disabled(true);
        el.set_text(LOADING_LABEL);

        Ok(Some(PendingAction {
            trigger: button,
            busy: Some(button),
            target,
            query,
            options,
            kind: BindingKind::ActionButton,
        }))
    }

    /// Put a form's submit button into its processing state.
    ///
    /// The query is the form's `query` field, else its `data-api-query`.
    pub fn begin_submit(&self, document: &mut Document, form: ElementId) -> Result<Option<PendingAction>> {
        let fields = document.form_data(form);
        let query = fields
            .get("query")
            .filter(|q| !q.is_empty())
            .cloned()
            .or_else(|| document[form].attribute(ATTR_QUERY).map(str::to_string))
            .filter(|q| !q.is_empty());
        let Some(query) = query else {
            return Ok(None);
        };
        let target = resolve_target(document, form)?;
        let options = connection_options(document, form);
        let submit = document.query_selector_within(form, "[type=\"submit\"]")?;
        if let Some(submit) = submit {
            let el = &mut document[submit];
            el.set_disabled(true);
            el.set_text(PROCESSING_LABEL);
        }

        Ok(Some(PendingAction {
            trigger: form,
            busy: submit,
            target,
            query,
            options,
            kind: BindingKind::Form,
        }))
    }

    /// Render the outcome into the target and restore the trigger.
    pub fn finish(&self, document: &mut Document, pending: &PendingAction, result: &Result<Value>) {
        if let Some(target) = pending.target {
            let el = &mut document[target];
            match result {
                Ok(data) => show_data(el, data, None, &self.render),
                Err(err) => show_error(el, &err.to_string(), &self.render),
            }
        }

        let Some(busy) = pending.busy else {
            return;
        };
        let el = &mut document[busy];
        let label = match pending.kind {
            BindingKind::Form => SUBMIT_LABEL.to_string(),
            _ => el
                .attribute(ATTR_ORIGINAL_TEXT)
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_BUTTON_LABEL)
                .to_string(),
        };
        el.set_disabled(false);
        el.set_text(label);
    }

    async fn run(&self, client: &EmbedClient, document: &mut Document, pending: Option<PendingAction>) -> Option<Result<Value>> {
        let pending = pending?;
        let result = client.query(&pending.query, &pending.options).await;
        self.finish(document, &pending, &result);
        Some(result)
    }

    /// Handle a click on an action button.
    ///
    /// Returns `Ok(None)` when the button does not trigger a query.
    pub async fn click(&self, client: &EmbedClient, document: &mut Document, button: ElementId) -> Result<Option<Result<Value>>> {
        let pending = self.begin_action(document, button)?;
        Ok(self.run(client, document, pending).await)
    }

    /// Handle a form submission.
    pub async fn submit(&self, client: &EmbedClient, document: &mut Document, form: ElementId) -> Result<Option<Result<Value>>> {
        let pending = self.begin_submit(document, form)?;
        Ok(self.run(client, document, pending).await)
    }
}
