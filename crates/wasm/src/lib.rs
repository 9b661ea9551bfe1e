use std::sync::{Mutex, MutexGuard};

use canvas_style_core::registry::ComponentDefaults;
use canvas_style_core::snapshot::{self, Workspace};
use canvas_style_core::{ResolveOptions, pipeline};
use canvas_style_protocol::{Breakpoint, PseudoState};
use wasm_bindgen::prelude::*;

static WORKSPACES: Mutex<Vec<Workspace>> = Mutex::new(Vec::new());

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn workspaces() -> Result<MutexGuard<'static, Vec<Workspace>>, JsError> {
    WORKSPACES
        .lock()
        .map_err(|_| JsError::new("workspace table poisoned"))
}

fn options(breakpoint: &str, state: &str) -> Result<ResolveOptions, JsError> {
    Ok(ResolveOptions::new(
        breakpoint.parse::<Breakpoint>().map_err(js_err)?,
        state.parse::<PseudoState>().map_err(js_err)?,
    ))
}

/// Load a workspace snapshot (tokens, classes, optional component-default
/// table) from JSON. Returns a handle (index) for later calls.
#[wasm_bindgen]
pub fn load_workspace(data: &[u8]) -> Result<usize, JsError> {
    let workspace = snapshot::parse_workspace(data).map_err(js_err)?;
    let mut workspaces = workspaces()?;
    let idx = workspaces.len();
    workspaces.push(workspace);
    Ok(idx)
}

/// Replace the token registry of a loaded workspace.
#[wasm_bindgen]
pub fn replace_tokens(handle: usize, data: &[u8]) -> Result<(), JsError> {
    let tokens = snapshot::parse_tokens(data).map_err(js_err)?;
    let mut workspaces = workspaces()?;
    let workspace = workspaces
        .get_mut(handle)
        .ok_or_else(|| JsError::new("invalid workspace handle"))?;
    workspace.replace_tokens(tokens);
    Ok(())
}

/// Replace the class store of a loaded workspace.
#[wasm_bindgen]
pub fn replace_classes(handle: usize, data: &[u8]) -> Result<(), JsError> {
    let classes = snapshot::parse_classes(data).map_err(js_err)?;
    let mut workspaces = workspaces()?;
    let workspace = workspaces
        .get_mut(handle)
        .ok_or_else(|| JsError::new("invalid workspace handle"))?;
    workspace.replace_classes(classes);
    Ok(())
}

/// Resolve one component (no inheritance), returning `ResolvedStyles` as JSON.
#[wasm_bindgen]
pub fn resolve_component(
    handle: usize,
    component: &[u8],
    breakpoint: &str,
    state: &str,
) -> Result<String, JsError> {
    let node = snapshot::parse_component(component).map_err(js_err)?;
    let options = options(breakpoint, state)?;
    let workspaces = workspaces()?;
    let workspace = workspaces
        .get(handle)
        .ok_or_else(|| JsError::new("invalid workspace handle"))?;

    let styles =
        pipeline::resolve_component(&workspace.context(options), &node.component_type, &node.style);
    serde_json::to_string(&styles).map_err(js_err)
}

/// Resolve a component tree, returning the `ResolvedNode` tree as JSON.
#[wasm_bindgen]
pub fn resolve_tree(
    handle: usize,
    tree: &[u8],
    breakpoint: &str,
    state: &str,
) -> Result<String, JsError> {
    let root = snapshot::parse_tree(tree).map_err(js_err)?;
    let options = options(breakpoint, state)?;
    let workspaces = workspaces()?;
    let workspace = workspaces
        .get(handle)
        .ok_or_else(|| JsError::new("invalid workspace handle"))?;

    let resolved = pipeline::resolve_tree(&workspace.context(options), &root);
    serde_json::to_string(&resolved).map_err(js_err)
}

/// Initial `dsTokenRefs` for a new instance of `component_type`, from the
/// built-in component-default table.
#[wasm_bindgen]
pub fn seed_token_refs(component_type: &str) -> Result<String, JsError> {
    let refs = ComponentDefaults::builtin().seed_token_refs(component_type);
    serde_json::to_string(&refs).map_err(js_err)
}

/// Version of the built-in component-default table.
#[wasm_bindgen]
pub fn defaults_version() -> u32 {
    ComponentDefaults::BUILTIN_VERSION
}
