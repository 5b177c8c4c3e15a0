// Copy/paste through a serialized buffer. Copying keeps uuids; every paste
// rekeys the buffer first so the same content can be pasted repeatedly.

use crate::error::Result;
use crate::geometry::vector::Vector2;
use crate::json::{dump_part_impl, insert_document_impl, GraphDocument};
use crate::model::NodeId;
use crate::Graph;

pub fn copy_part_impl(g: &Graph, ids: &[NodeId]) -> GraphDocument {
    dump_part_impl(g, ids)
}

pub fn paste_impl(g: &mut Graph, buffer: &GraphDocument, offset: Vector2) -> Result<Vec<NodeId>> {
    let fresh = buffer.with_fresh_uuids();
    insert_document_impl(g, &fresh, offset)
}
