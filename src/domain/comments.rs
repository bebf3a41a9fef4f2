//! Reply-thread reconstruction from flat comment rows.
//!
//! The store keeps comments as a flat list with an optional parent
//! reference. Threading is rebuilt in two passes: materialise every row as
//! a node and index children by parent, then attach each node to its parent
//! or the root list. Pure function, independent of any fetching code.

use std::collections::HashMap;

use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::entities::CommentRecord;

pub const MAX_THREAD_DEPTH: u8 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub id: Uuid,
    pub author_name: String,
    pub body_html: String,
    pub created_at: OffsetDateTime,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    pub fn count(nodes: &[CommentNode]) -> usize {
        nodes
            .iter()
            .map(|node| 1 + CommentNode::count(&node.replies))
            .sum()
    }
}

#[derive(Debug, Error)]
pub enum CommentTreeError {
    #[error("comment `{id}` references itself as a parent")]
    SelfParent { id: Uuid },
    #[error("comment `{child}` references missing parent `{parent}`")]
    MissingParent { child: Uuid, parent: Uuid },
    #[error("duplicate comment id `{id}` detected")]
    DuplicateId { id: Uuid },
    #[error("comment `{id}` exceeds maximum thread depth {max_depth}")]
    DepthExceeded { id: Uuid, max_depth: u8 },
    #[error("comment `{id}` could not be materialised while building thread")]
    MissingNode { id: Uuid },
}

pub fn build_comment_tree(
    records: Vec<CommentRecord>,
) -> Result<Vec<CommentNode>, CommentTreeError> {
    let mut nodes: HashMap<Uuid, CommentNode> = HashMap::with_capacity(records.len());
    let mut children: HashMap<Option<Uuid>, Vec<Uuid>> = HashMap::new();

    for record in records {
        if record.parent_id.is_some_and(|parent| parent == record.id) {
            return Err(CommentTreeError::SelfParent { id: record.id });
        }
        if nodes.contains_key(&record.id) {
            return Err(CommentTreeError::DuplicateId { id: record.id });
        }

        let node = CommentNode {
            id: record.id,
            author_name: record.author_name,
            body_html: record.body_html,
            created_at: record.created_at,
            replies: Vec::new(),
        };

        children.entry(record.parent_id).or_default().push(node.id);
        nodes.insert(node.id, node);
    }

    for (parent_id, child_ids) in &children {
        if let Some(parent_id) = parent_id
            && !nodes.contains_key(parent_id)
            && let Some(&child) = child_ids.first()
        {
            return Err(CommentTreeError::MissingParent {
                child,
                parent: *parent_id,
            });
        }
    }

    // Replies read oldest-first; id is the stable tiebreaker.
    for ids in children.values_mut() {
        ids.sort_by_key(|id| {
            nodes
                .get(id)
                .map(|node| (node.created_at, node.id))
                .unwrap_or((OffsetDateTime::UNIX_EPOCH, *id))
        });
    }

    let mut working_nodes = nodes;
    let mut roots = Vec::new();

    if let Some(root_ids) = children.get(&None) {
        for &root_id in root_ids {
            roots.push(assemble(root_id, 1, &mut working_nodes, &children)?);
        }
    }

    if let Some(&orphan) = working_nodes.keys().next() {
        return Err(CommentTreeError::MissingNode { id: orphan });
    }

    Ok(roots)
}

fn assemble(
    id: Uuid,
    depth: u8,
    nodes: &mut HashMap<Uuid, CommentNode>,
    children: &HashMap<Option<Uuid>, Vec<Uuid>>,
) -> Result<CommentNode, CommentTreeError> {
    if depth > MAX_THREAD_DEPTH {
        return Err(CommentTreeError::DepthExceeded {
            id,
            max_depth: MAX_THREAD_DEPTH,
        });
    }

    let mut node = nodes
        .remove(&id)
        .ok_or(CommentTreeError::MissingNode { id })?;

    if let Some(child_ids) = children.get(&Some(id)) {
        for &child_id in child_ids {
            node.replies
                .push(assemble(child_id, depth + 1, nodes, children)?);
        }
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u128, parent: Option<u128>, created_offset_secs: i64) -> CommentRecord {
        CommentRecord {
            id: Uuid::from_u128(id),
            page_id: Uuid::nil(),
            parent_id: parent.map(Uuid::from_u128),
            author_name: format!("author-{id}"),
            body_html: "<p>hi</p>".to_string(),
            created_at: OffsetDateTime::UNIX_EPOCH + time::Duration::seconds(created_offset_secs),
        }
    }

    #[test]
    fn builds_nested_replies_oldest_first() {
        let records = vec![
            record(1, None, 0),
            record(2, Some(1), 30),
            record(3, Some(1), 10),
            record(4, None, 5),
        ];

        let tree = build_comment_tree(records).expect("tree");
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, Uuid::from_u128(1));
        assert_eq!(tree[1].id, Uuid::from_u128(4));

        let reply_ids: Vec<u128> = tree[0].replies.iter().map(|n| n.id.as_u128()).collect();
        assert_eq!(reply_ids, vec![3, 2]);
        assert_eq!(CommentNode::count(&tree), 4);
    }

    #[test]
    fn rejects_missing_parent() {
        let records = vec![record(1, Some(99), 0)];
        let err = build_comment_tree(records).expect_err("missing parent");
        assert!(matches!(err, CommentTreeError::MissingParent { .. }));
    }

    #[test]
    fn rejects_self_parent() {
        let records = vec![record(1, Some(1), 0)];
        let err = build_comment_tree(records).expect_err("self parent");
        assert!(matches!(err, CommentTreeError::SelfParent { .. }));
    }

    #[test]
    fn rejects_runaway_depth() {
        let mut records = Vec::new();
        let mut parent = None;
        for i in 1..=(MAX_THREAD_DEPTH as u128 + 1) {
            records.push(record(i, parent, i as i64));
            parent = Some(i);
        }

        let err = build_comment_tree(records).expect_err("depth overflow");
        assert!(matches!(err, CommentTreeError::DepthExceeded { .. }));
    }

    #[test]
    fn empty_input_yields_empty_thread() {
        let tree = build_comment_tree(Vec::new()).expect("empty tree");
        assert!(tree.is_empty());
    }
}
