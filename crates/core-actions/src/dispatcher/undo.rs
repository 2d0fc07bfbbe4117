//! `u` / `U`: step through the snapshot history, `count` times.

use super::{DispatchResult, take_count};
use crate::ModalEditor;
use core_model::PrimitiveEditor;

pub(super) fn handle_undo<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    let n = take_count(ed);
    let steps = (0..n).take_while(|_| ed.undo()).count();
    tracing::trace!(target: "actions.dispatch", op = "undo", requested = n, steps, "undo");
    DispatchResult::dirty()
}

pub(super) fn handle_redo<E: PrimitiveEditor>(ed: &mut ModalEditor<E>) -> DispatchResult {
    let n = take_count(ed);
    let steps = (0..n).take_while(|_| ed.redo()).count();
    tracing::trace!(target: "actions.dispatch", op = "redo", requested = n, steps, "redo");
    DispatchResult::dirty()
}
