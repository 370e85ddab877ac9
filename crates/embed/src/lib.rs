//! Embeddable SDK for API Connector pages.
//!
//! A page declares queries with `data-api-*` attributes; [`Binder`] finds
//! them, [`EmbedClient`] resolves them against the backend (with a short-lived
//! cache), and the [`render`] functions turn results into HTML.
//!
//! ```rust,ignore
//! use apiconn_embed::{Binder, EmbedClient};
//!
//! let client = EmbedClient::auto_init(&document)?.expect("script tag with data-api-key");
//! let bindings = Binder::new().bind(&mut document);
//! bindings.run_auto_load(&client, &mut document).await;
//! ```

pub mod binding;
pub mod cache;
pub mod client;
pub mod dom;
pub mod error;
pub mod events;
pub mod options;
pub mod render;
pub mod styles;

pub use binding::{
    BINDING_DESCRIPTORS, Binder, Binding, BindingDescriptor, BindingKind, BindingSet,
    PendingAction, UNSUPPORTED_ATTRIBUTES,
};
pub use cache::QueryCache;
pub use client::EmbedClient;
pub use dom::{Document, Element, ElementId, Selector};
pub use error::{EmbedError, Result};
pub use events::{EmbedEvent, EventKind, EventRegistry};
pub use options::{EmbedOptions, QueryOptions};
pub use render::{
    RenderOptions, apply_template, escape_html, render_data, render_error, render_list,
    render_object,
};
pub use styles::DEFAULT_STYLES;
