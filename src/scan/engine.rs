//! The traversal at the heart of the census
//!
//! Depth-first walk of the scoped subtree. Instances resolve to canonical
//! entities; the chain of entity ids opened on the current path turns
//! nesting into dependency edges. Counts finalize post-order, so an outer
//! component's record can already exist (at zero) by the time its own
//! instance closes.

use super::{filter::is_excluded, resolve::resolve, UsageAggregate};
use crate::document::{Document, Node, NodeId};

struct ScanContext<'a> {
    doc: &'a Document,
    ignored: &'a [String],
    agg: UsageAggregate,
}

/// Walk `root` and aggregate component usage, honoring the exclusion list
///
/// Exclusion prunes whole subtrees. An instance whose canonical entity is
/// itself excluded contributes nothing at all, so the report never lists a
/// dependency it would refuse to show a record for.
pub fn scan(doc: &Document, root: &Node, ignored: &[String]) -> UsageAggregate {
    let mut cx = ScanContext {
        doc,
        ignored,
        agg: UsageAggregate::new(),
    };
    let mut chain: Vec<NodeId> = Vec::new();
    cx.visit(root, &mut chain);
    tracing::info!(
        root = %root.id,
        components = cx.agg.len(),
        "component scan complete"
    );
    cx.agg
}

impl<'a> ScanContext<'a> {
    /// `chain` holds the canonical entity ids of enclosing instances on
    /// the current path, outermost first.
    fn visit(&mut self, node: &Node, chain: &mut Vec<NodeId>) {
        let doc = self.doc;
        if is_excluded(doc, node, self.ignored) {
            return;
        }

        if node.is_instance() {
            let Some(entity) = resolve(doc, node) else {
                tracing::debug!(instance = %node.id, "instance has no resolvable main component, skipping");
                return;
            };
            if is_excluded(doc, entity, self.ignored) {
                return;
            }

            // Nesting anywhere inside an open instance is a dependency of
            // that instance's entity, not just of the immediate parent.
            for owner in chain.iter() {
                self.agg.add_dependency(owner, &entity.id);
            }

            let entity_id = entity.id.clone();
            let opened = !chain.contains(&entity_id);
            if opened {
                chain.push(entity_id.clone());
            }
            for child in doc.child_nodes(node) {
                self.visit(child, chain);
            }
            if opened {
                chain.pop();
            }

            self.agg.record_use(&entity_id);
        } else if node.is_container() {
            for child in doc.child_nodes(node) {
                self.visit(child, chain);
            }
        }
        // Leaves contribute nothing.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignored(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn scan_page(doc: &Document, ignored: &[String]) -> UsageAggregate {
        scan(doc, doc.first_page().unwrap(), ignored)
    }

    #[test]
    fn tree_without_instances_yields_empty_aggregate() {
        let doc = Document::from_json(
            r#"{
                "pages": [
                    {
                        "id": "0:1", "name": "P", "type": "PAGE",
                        "children": [
                            { "id": "1:1", "name": "F", "type": "FRAME", "children": [
                                { "id": "1:2", "name": "t", "type": "TEXT" }
                            ] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        assert!(scan_page(&doc, &[]).is_empty());
    }

    #[test]
    fn nested_instances_become_dependency_edges() {
        // Card instance embedding a Button instance
        let doc = Document::from_json(
            r#"{
                "pages": [
                    {
                        "id": "0:1", "name": "P", "type": "PAGE",
                        "children": [
                            { "id": "c:card", "name": "Card", "type": "COMPONENT", "children": [] },
                            { "id": "c:btn", "name": "Button", "type": "COMPONENT", "children": [] },
                            { "id": "i:1", "name": "card", "type": "INSTANCE",
                              "mainComponent": "c:card",
                              "children": [
                                { "id": "i:2", "name": "button", "type": "INSTANCE",
                                  "mainComponent": "c:btn", "children": [] }
                              ] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let agg = scan_page(&doc, &[]);
        assert_eq!(agg.len(), 2);
        let card = agg.get("c:card").unwrap();
        assert_eq!(card.count, 1);
        assert_eq!(card.depends_on, ["c:btn"]);
        let btn = agg.get("c:btn").unwrap();
        assert_eq!(btn.count, 1);
        assert!(btn.depends_on.is_empty());
    }

    #[test]
    fn dependency_is_marked_against_every_open_ancestor() {
        // Dialog > Card > Button: Button is a dependency of both
        let doc = Document::from_json(
            r#"{
                "pages": [
                    {
                        "id": "0:1", "name": "P", "type": "PAGE",
                        "children": [
                            { "id": "c:dlg", "name": "Dialog", "type": "COMPONENT", "children": [] },
                            { "id": "c:card", "name": "Card", "type": "COMPONENT", "children": [] },
                            { "id": "c:btn", "name": "Button", "type": "COMPONENT", "children": [] },
                            { "id": "i:1", "name": "dialog", "type": "INSTANCE",
                              "mainComponent": "c:dlg",
                              "children": [
                                { "id": "i:2", "name": "card", "type": "INSTANCE",
                                  "mainComponent": "c:card",
                                  "children": [
                                    { "id": "i:3", "name": "button", "type": "INSTANCE",
                                      "mainComponent": "c:btn", "children": [] }
                                  ] }
                              ] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let agg = scan_page(&doc, &[]);
        assert_eq!(agg.get("c:dlg").unwrap().depends_on, ["c:card", "c:btn"]);
        assert_eq!(agg.get("c:card").unwrap().depends_on, ["c:btn"]);
    }

    #[test]
    fn variants_collapse_into_one_record() {
        let doc = Document::from_json(
            r#"{
                "pages": [
                    {
                        "id": "0:1", "name": "P", "type": "PAGE",
                        "children": [
                            { "id": "set:1", "name": "Button", "type": "COMPONENT_SET",
                              "children": [
                                { "id": "var:1", "name": "State=Default", "type": "COMPONENT", "children": [] },
                                { "id": "var:2", "name": "State=Hover", "type": "COMPONENT", "children": [] }
                              ] },
                            { "id": "i:1", "name": "b1", "type": "INSTANCE",
                              "mainComponent": "var:1", "children": [] },
                            { "id": "i:2", "name": "b2", "type": "INSTANCE",
                              "mainComponent": "var:2", "children": [] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let agg = scan_page(&doc, &[]);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.get("set:1").unwrap().count, 2);
    }

    #[test]
    fn excluded_subtree_contributes_nothing() {
        let doc = Document::from_json(
            r#"{
                "pages": [
                    {
                        "id": "0:1", "name": "P", "type": "PAGE",
                        "children": [
                            { "id": "c:btn", "name": "Button", "type": "COMPONENT", "children": [] },
                            { "id": "f:1", "name": "F", "type": "FRAME",
                              "children": [
                                { "id": "i:1", "name": "button", "type": "INSTANCE",
                                  "mainComponent": "c:btn", "children": [] }
                              ] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scan_page(&doc, &[]).get("c:btn").unwrap().count, 1);
        assert!(scan_page(&doc, &ignored(&["F"])).is_empty());
    }

    #[test]
    fn instance_of_an_excluded_component_is_pruned_at_use_site() {
        // The Button component lives inside the ignored frame; an instance
        // outside it must neither count nor appear as a dependency.
        let doc = Document::from_json(
            r#"{
                "pages": [
                    {
                        "id": "0:1", "name": "P", "type": "PAGE",
                        "children": [
                            { "id": "f:lib", "name": "Library", "type": "FRAME",
                              "children": [
                                { "id": "c:btn", "name": "Button", "type": "COMPONENT", "children": [] }
                              ] },
                            { "id": "c:card", "name": "Card", "type": "COMPONENT", "children": [] },
                            { "id": "i:1", "name": "card", "type": "INSTANCE",
                              "mainComponent": "c:card",
                              "children": [
                                { "id": "i:2", "name": "button", "type": "INSTANCE",
                                  "mainComponent": "c:btn", "children": [] }
                              ] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let agg = scan_page(&doc, &ignored(&["Library"]));
        let card = agg.get("c:card").unwrap();
        assert_eq!(card.count, 1);
        assert!(card.depends_on.is_empty());
        assert!(agg.get("c:btn").is_none());
    }

    #[test]
    fn self_nesting_inflates_count_but_adds_no_self_edge() {
        let doc = Document::from_json(
            r#"{
                "pages": [
                    {
                        "id": "0:1", "name": "P", "type": "PAGE",
                        "children": [
                            { "id": "c:box", "name": "Box", "type": "COMPONENT", "children": [] },
                            { "id": "i:1", "name": "outer", "type": "INSTANCE",
                              "mainComponent": "c:box",
                              "children": [
                                { "id": "i:2", "name": "inner", "type": "INSTANCE",
                                  "mainComponent": "c:box", "children": [] }
                              ] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let agg = scan_page(&doc, &[]);
        let rec = agg.get("c:box").unwrap();
        assert_eq!(rec.count, 2);
        assert!(rec.depends_on.is_empty());
    }

    #[test]
    fn unresolvable_instance_is_skipped_entirely() {
        let doc = Document::from_json(
            r#"{
                "pages": [
                    {
                        "id": "0:1", "name": "P", "type": "PAGE",
                        "children": [
                            { "id": "c:card", "name": "Card", "type": "COMPONENT", "children": [] },
                            { "id": "i:1", "name": "card", "type": "INSTANCE",
                              "mainComponent": "c:card",
                              "children": [
                                { "id": "i:2", "name": "ghost", "type": "INSTANCE",
                                  "mainComponent": "missing:1", "children": [] }
                              ] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let agg = scan_page(&doc, &[]);
        assert_eq!(agg.len(), 1);
        assert!(agg.get("c:card").unwrap().depends_on.is_empty());
    }

    #[test]
    fn first_encounter_dependency_edge_is_recorded() {
        // Card's own record does not exist yet when Button is discovered
        // inside it; the edge must still land.
        let doc = Document::from_json(
            r#"{
                "pages": [
                    {
                        "id": "0:1", "name": "P", "type": "PAGE",
                        "children": [
                            { "id": "c:card", "name": "Card", "type": "COMPONENT", "children": [] },
                            { "id": "c:btn", "name": "Button", "type": "COMPONENT", "children": [] },
                            { "id": "i:1", "name": "card", "type": "INSTANCE",
                              "mainComponent": "c:card",
                              "children": [
                                { "id": "i:2", "name": "button", "type": "INSTANCE",
                                  "mainComponent": "c:btn", "children": [] }
                              ] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        let agg = scan_page(&doc, &[]);
        assert_eq!(agg.get("c:card").unwrap().depends_on, ["c:btn"]);
    }

    #[test]
    fn counts_match_resolving_instances_in_scope() {
        let doc = Document::from_json(
            r#"{
                "pages": [
                    {
                        "id": "0:1", "name": "P", "type": "PAGE",
                        "children": [
                            { "id": "c:btn", "name": "Button", "type": "COMPONENT", "children": [] },
                            { "id": "i:1", "name": "b1", "type": "INSTANCE",
                              "mainComponent": "c:btn", "children": [] },
                            { "id": "g:1", "name": "g", "type": "GROUP",
                              "children": [
                                { "id": "i:2", "name": "b2", "type": "INSTANCE",
                                  "mainComponent": "c:btn", "children": [] },
                                { "id": "i:3", "name": "b3", "type": "INSTANCE",
                                  "mainComponent": "c:btn", "children": [] }
                              ] }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scan_page(&doc, &[]).get("c:btn").unwrap().count, 3);
    }
}
