// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: Apache-2.0
// Please see LICENSE in the repository root for full details.

//! End-to-end tests driving [`EditorBridge`] against a scripted fake
//! widget and a fake upload service.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use speculoos::prelude::*;
use url::Url;

use composer_host::{
    ChangeSignal, ContentEnvelope, ContentSnapshot, EditorBridge,
    EditorCollaborator, EditorError, EditorFactory, EditorOptions,
    ImageUploadAdapter, UploadError, UploadFile, UploadService, render,
};
use delta_doc::{DeltaDocument, DeltaOp};

const WINDOW: Duration = Duration::from_millis(300);

// =======================================================================
// Scripted widget
// =======================================================================

/// Shared state between a [`ScriptedEditor`], its factory, and the test.
#[derive(Default)]
struct WidgetState {
    document: DeltaDocument,
    pasted_html: Option<String>,
    signal: Option<ChangeSignal>,
    /// Call journal, in invocation order.
    calls: Vec<String>,
    mount_id: Option<String>,
    options: Option<EditorOptions>,
    upload: Option<ImageUploadAdapter>,
}

#[derive(Clone, Default)]
struct WidgetHandle(Rc<RefCell<WidgetState>>);

impl WidgetHandle {
    /// Simulate the user typing: append a text op and raise the change
    /// notification.
    fn type_text(&self, text: &str) {
        let mut state = self.0.borrow_mut();
        state.document.ops.push(DeltaOp::text(text));
        if let Some(signal) = &state.signal {
            signal.notify();
        }
    }

    fn calls(&self) -> Vec<String> {
        self.0.borrow().calls.clone()
    }

    fn call_position(&self, name: &str) -> usize {
        self.calls()
            .iter()
            .position(|c| c == name)
            .unwrap_or_else(|| panic!("no `{name}` call recorded"))
    }
}

struct ScriptedEditor {
    handle: WidgetHandle,
}

impl EditorCollaborator for ScriptedEditor {
    fn wait_ready(&mut self) -> Result<(), EditorError> {
        self.handle.0.borrow_mut().calls.push("ready".into());
        Ok(())
    }

    fn set_delta(&mut self, document: &DeltaDocument) -> Result<(), EditorError> {
        let mut state = self.handle.0.borrow_mut();
        state.calls.push("set_delta".into());
        state.document = document.clone();
        state.pasted_html = None;
        Ok(())
    }

    fn paste_html(&mut self, html: &str) -> Result<(), EditorError> {
        let mut state = self.handle.0.borrow_mut();
        state.calls.push("paste_html".into());
        state.pasted_html = Some(html.to_owned());
        Ok(())
    }

    fn delta(&self) -> DeltaDocument {
        self.handle.0.borrow().document.clone()
    }

    fn plain_text(&self) -> String {
        self.handle.0.borrow().document.plain_text()
    }

    fn html(&self) -> String {
        let state = self.handle.0.borrow();
        state
            .pasted_html
            .clone()
            .unwrap_or_else(|| render(&state.document))
    }

    fn subscribe(&mut self, signal: ChangeSignal) {
        let mut state = self.handle.0.borrow_mut();
        state.calls.push("subscribe".into());
        state.signal = Some(signal);
    }
}

struct ScriptedFactory {
    handle: WidgetHandle,
}

impl EditorFactory for ScriptedFactory {
    fn create(
        &self,
        mount_id: &str,
        options: &EditorOptions,
        upload: ImageUploadAdapter,
    ) -> Result<Box<dyn EditorCollaborator>, EditorError> {
        let mut state = self.handle.0.borrow_mut();
        state.calls.push("create".into());
        state.mount_id = Some(mount_id.to_owned());
        state.options = Some(options.clone());
        state.upload = Some(upload);
        Ok(Box::new(ScriptedEditor {
            handle: self.handle.clone(),
        }))
    }
}

// =======================================================================
// Fake upload services
// =======================================================================

struct FixedUrlService(&'static str);

impl UploadService for FixedUrlService {
    fn upload(&self, _file: &UploadFile) -> Result<Url, UploadError> {
        Ok(Url::parse(self.0).expect("valid url"))
    }
}

// =======================================================================
// Helpers
// =======================================================================

fn adapter() -> ImageUploadAdapter {
    ImageUploadAdapter::new(Box::new(FixedUrlService(
        "https://cdn.example.com/i/1.png",
    )))
}

fn empty_delta() -> ContentEnvelope {
    ContentEnvelope::Delta(DeltaDocument::default())
}

fn bridge_with(
    handle: &WidgetHandle,
    initial: ContentEnvelope,
) -> EditorBridge {
    let factory = ScriptedFactory {
        handle: handle.clone(),
    };
    EditorBridge::new(
        &factory,
        &EditorOptions::default(),
        initial,
        adapter(),
        WINDOW,
    )
    .expect("bridge construction")
}

fn at(base: Instant, ms: u64) -> Instant {
    base + Duration::from_millis(ms)
}

// =======================================================================
// Construction and seeding
// =======================================================================

#[test]
fn ready_is_awaited_before_seeding() {
    let handle = WidgetHandle::default();
    let _bridge = bridge_with(&handle, empty_delta());

    assert!(
        handle.call_position("ready") < handle.call_position("set_delta"),
        "seeding must wait for the ready signal: {:?}",
        handle.calls()
    );
}

#[test]
fn subscription_happens_once_after_seeding() {
    let handle = WidgetHandle::default();
    let _bridge = bridge_with(&handle, empty_delta());

    let calls = handle.calls();
    let subscriptions = calls.iter().filter(|c| *c == "subscribe").count();
    assert_eq!(subscriptions, 1);
    assert!(
        handle.call_position("set_delta") < handle.call_position("subscribe")
    );
}

#[test]
fn html_envelope_is_pasted_as_trusted_markup() {
    let handle = WidgetHandle::default();
    let _bridge = bridge_with(
        &handle,
        ContentEnvelope::Html("<p>seed</p>".into()),
    );

    assert_eq!(
        handle.0.borrow().pasted_html.as_deref(),
        Some("<p>seed</p>")
    );
    assert!(!handle.calls().contains(&"set_delta".to_string()));
}

#[test]
fn delta_envelope_is_set_directly() {
    let handle = WidgetHandle::default();
    let document = DeltaDocument::from_ops(vec![DeltaOp::text("seed")]);
    let _bridge =
        bridge_with(&handle, ContentEnvelope::Delta(document.clone()));

    assert_eq!(handle.0.borrow().document, document);
    assert!(!handle.calls().contains(&"paste_html".to_string()));
}

#[test]
fn initial_content_populates_the_bound_value() {
    let handle = WidgetHandle::default();
    let document = DeltaDocument::from_ops(vec![DeltaOp::text("seed")]);
    let bridge = bridge_with(&handle, ContentEnvelope::Delta(document));

    assert_that(&bridge.content().plain_text).is_equal_to("seed".to_string());
}

#[test]
fn factory_receives_the_generated_mount_id_and_options() {
    let handle = WidgetHandle::default();
    let bridge = bridge_with(&handle, empty_delta());

    let state = handle.0.borrow();
    assert_eq!(state.mount_id.as_deref(), Some(bridge.mount_id()));
    assert_eq!(state.options.as_ref(), Some(&EditorOptions::default()));
}

#[test]
fn each_bridge_gets_its_own_mount_id() {
    let first = WidgetHandle::default();
    let second = WidgetHandle::default();
    let a = bridge_with(&first, empty_delta());
    let b = bridge_with(&second, empty_delta());
    assert_ne!(a.mount_id(), b.mount_id());
}

// =======================================================================
// Throttled change propagation
// =======================================================================

#[test]
fn no_change_means_no_delivery() {
    let handle = WidgetHandle::default();
    let mut bridge = bridge_with(&handle, empty_delta());

    let t0 = Instant::now();
    assert!(bridge.tick(at(t0, 1_000)).is_none());
}

#[test]
fn a_burst_of_changes_delivers_one_snapshot_with_the_last_state() {
    let handle = WidgetHandle::default();
    let mut bridge = bridge_with(&handle, empty_delta());
    let t0 = Instant::now();

    handle.type_text("a");
    handle.type_text("b");
    assert!(bridge.tick(at(t0, 0)).is_none(), "window just opened");

    handle.type_text("c");
    assert!(bridge.tick(at(t0, 150)).is_none(), "window still open");

    let delivered = bridge.tick(at(t0, 300)).cloned();
    let delivered = delivered.expect("one delivery at the window edge");
    assert_that(&delivered.plain_text).is_equal_to("abc".to_string());

    assert!(
        bridge.tick(at(t0, 301)).is_none(),
        "at most one delivery per window"
    );
}

#[test]
fn delivery_reaches_both_the_listener_and_the_bound_value() {
    let handle = WidgetHandle::default();
    let mut bridge = bridge_with(&handle, empty_delta());

    let deliveries: Rc<RefCell<Vec<ContentSnapshot>>> = Rc::default();
    let sink = Rc::clone(&deliveries);
    bridge.on_change(Box::new(move |snapshot| {
        sink.borrow_mut().push(snapshot.clone());
    }));

    let t0 = Instant::now();
    handle.type_text("x");
    bridge.tick(at(t0, 0));
    bridge.tick(at(t0, 300));

    let deliveries = deliveries.borrow();
    assert_that(&*deliveries).has_length(1);
    assert_eq!(deliveries[0].plain_text, "x");
    assert_eq!(bridge.content(), &deliveries[0]);
}

#[test]
fn separate_windows_deliver_separately() {
    let handle = WidgetHandle::default();
    let mut bridge = bridge_with(&handle, empty_delta());
    let t0 = Instant::now();

    handle.type_text("a");
    bridge.tick(at(t0, 0));
    assert!(bridge.tick(at(t0, 300)).is_some());

    handle.type_text("b");
    bridge.tick(at(t0, 400));
    let second = bridge.tick(at(t0, 700)).cloned().expect("second delivery");
    assert_eq!(second.plain_text, "ab");
}

#[test]
fn next_deadline_reports_the_pending_window() {
    let handle = WidgetHandle::default();
    let mut bridge = bridge_with(&handle, empty_delta());
    let t0 = Instant::now();

    assert!(bridge.next_deadline().is_none());
    handle.type_text("a");
    bridge.tick(t0);
    assert_eq!(bridge.next_deadline(), Some(t0 + WINDOW));
}

#[test]
fn snapshot_now_bypasses_the_throttle() {
    let handle = WidgetHandle::default();
    let bridge = bridge_with(&handle, empty_delta());

    handle.type_text("fresh");
    assert_eq!(bridge.snapshot_now().plain_text, "fresh");
    assert_eq!(bridge.content().plain_text, "");
}

#[test]
fn delivered_html_comes_from_the_widget() {
    let handle = WidgetHandle::default();
    let mut bridge = bridge_with(&handle, empty_delta());
    let t0 = Instant::now();

    handle.type_text("hi");
    bridge.tick(t0);
    let delivered = bridge.tick(at(t0, 300)).expect("delivery");
    assert_eq!(delivered.html, "<span style=\"\">hi</span>");
}

// =======================================================================
// Caller-initiated replacement
// =======================================================================

#[test]
fn set_content_reseeds_the_live_widget() {
    let handle = WidgetHandle::default();
    let mut bridge = bridge_with(&handle, empty_delta());

    let replacement = DeltaDocument::from_ops(vec![DeltaOp::text("new")]);
    bridge
        .set_content(ContentEnvelope::Delta(replacement))
        .expect("replacement");

    assert_eq!(bridge.content().plain_text, "new");
    let set_deltas = handle
        .calls()
        .iter()
        .filter(|c| *c == "set_delta")
        .count();
    assert_eq!(set_deltas, 2, "initial seed plus replacement");
}

#[test]
fn set_content_with_html_uses_the_trusted_paste_path() {
    let handle = WidgetHandle::default();
    let mut bridge = bridge_with(&handle, empty_delta());

    bridge
        .set_content(ContentEnvelope::Html("<p>swap</p>".into()))
        .expect("replacement");

    assert_eq!(
        handle.0.borrow().pasted_html.as_deref(),
        Some("<p>swap</p>")
    );
    assert_eq!(bridge.content().html, "<p>swap</p>");
}

// =======================================================================
// Upload adapter wiring
// =======================================================================

#[test]
fn the_widget_drives_the_upload_adapter_handed_to_the_factory() {
    let handle = WidgetHandle::default();
    let _bridge = bridge_with(&handle, empty_delta());

    let mut state = handle.0.borrow_mut();
    let adapter = state.upload.as_mut().expect("adapter passed to factory");

    let file = UploadFile {
        name: "cat.png".into(),
        mime: "image/png".into(),
        bytes: vec![1, 2, 3],
    };
    let mut replies = Vec::new();
    adapter.handle_upload(&file, &mut |reply| replies.push(reply));

    assert_that(&replies).has_length(1);
    assert_eq!(replies[0].code, 0);
    assert_eq!(replies[0].data.image_url, "https://cdn.example.com/i/1.png");
    assert!(!adapter.loading());
}
