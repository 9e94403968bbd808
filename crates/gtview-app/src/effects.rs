//! Data-fetch orchestrator
//!
//! Each fetch rule watches an exact slice of [`ViewState`]. After every state
//! update [`Effects::reconcile`] compares each rule's current dependency key
//! with the last one it acted on and emits a fetch only when that key changed.
//!
//! Every emitted fetch carries a ticket. A response is applied only while its
//! ticket is still the rule's current one, so a superseded request can never
//! overwrite newer data.

use std::collections::HashMap;

use gtview_core::DetailKind;

use crate::view::{FileKey, FileSelection, ViewState};

/// Monotonic id of an issued fetch
pub type Ticket = u64;

/// The independent reactive fetch rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchRule {
    /// Both run lists, on mount and on reload
    RunLists,
    /// Content run detail rows
    RunDetail,
    /// Indentation run detail rows
    IndentationDetail,
    /// Three-way view for the open file page
    ThreeWay,
    /// Per-file results of the selected run
    RunResults,
    /// Paragraph diff of the selected file
    FileDiff,
}

/// A fetch to perform
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    RunLists {
        ticket: Ticket,
    },
    RunDetail {
        ticket: Ticket,
        run_id: String,
        kind: DetailKind,
    },
    ThreeWay {
        ticket: Ticket,
        key: FileKey,
    },
    RunResults {
        ticket: Ticket,
        run_id: String,
    },
    FileDiff {
        ticket: Ticket,
        selection: FileSelection,
    },
}

impl FetchRequest {
    pub fn rule(&self) -> FetchRule {
        match self {
            FetchRequest::RunLists { .. } => FetchRule::RunLists,
            FetchRequest::RunDetail {
                kind: DetailKind::Content,
                ..
            } => FetchRule::RunDetail,
            FetchRequest::RunDetail {
                kind: DetailKind::Indentation,
                ..
            } => FetchRule::IndentationDetail,
            FetchRequest::ThreeWay { .. } => FetchRule::ThreeWay,
            FetchRequest::RunResults { .. } => FetchRule::RunResults,
            FetchRequest::FileDiff { .. } => FetchRule::FileDiff,
        }
    }

    pub fn ticket(&self) -> Ticket {
        match self {
            FetchRequest::RunLists { ticket }
            | FetchRequest::RunDetail { ticket, .. }
            | FetchRequest::ThreeWay { ticket, .. }
            | FetchRequest::RunResults { ticket, .. }
            | FetchRequest::FileDiff { ticket, .. } => *ticket,
        }
    }
}

/// What a reconcile pass decided
#[derive(Debug, Default, PartialEq)]
pub struct Reconciled {
    /// Fetches to start
    pub requests: Vec<FetchRequest>,
    /// Rules whose key went away; their data must be cleared and any
    /// in-flight fetch abandoned
    pub cleared: Vec<FetchRule>,
}

impl Reconciled {
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && self.cleared.is_empty()
    }
}

/// Last-seen dependency keys plus the current ticket of each rule
#[derive(Debug, Default)]
pub struct Effects {
    mounted: bool,
    detail: Option<String>,
    indentation_detail: Option<String>,
    three_way: Option<FileKey>,
    run_results: Option<String>,
    file_diff: Option<FileSelection>,
    current: HashMap<FetchRule, Ticket>,
    next_ticket: Ticket,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the fetches whose dependency keys changed since the last pass
    pub fn reconcile(&mut self, view: &ViewState) -> Reconciled {
        let mut out = Reconciled::default();

        if !self.mounted {
            self.mounted = true;
            let ticket = self.issue(FetchRule::RunLists);
            out.requests.push(FetchRequest::RunLists { ticket });
        }

        let detail = view.detail_run_id().map(str::to_string);
        if detail != self.detail {
            self.detail = detail.clone();
            match detail {
                Some(run_id) => {
                    let ticket = self.issue(FetchRule::RunDetail);
                    out.requests.push(FetchRequest::RunDetail {
                        ticket,
                        run_id,
                        kind: DetailKind::Content,
                    });
                }
                None => self.clear(FetchRule::RunDetail, &mut out),
            }
        }

        let indentation = view.indentation_detail_run_id().map(str::to_string);
        if indentation != self.indentation_detail {
            self.indentation_detail = indentation.clone();
            match indentation {
                Some(run_id) => {
                    let ticket = self.issue(FetchRule::IndentationDetail);
                    out.requests.push(FetchRequest::RunDetail {
                        ticket,
                        run_id,
                        kind: DetailKind::Indentation,
                    });
                }
                None => self.clear(FetchRule::IndentationDetail, &mut out),
            }
        }

        let file_key = view.file_key();
        if file_key != self.three_way {
            self.three_way = file_key.clone();
            match file_key {
                Some(key) => {
                    let ticket = self.issue(FetchRule::ThreeWay);
                    out.requests.push(FetchRequest::ThreeWay { ticket, key });
                }
                None => self.clear(FetchRule::ThreeWay, &mut out),
            }
        }

        let selected = view.selected_run_id().map(str::to_string);
        if selected != self.run_results {
            self.run_results = selected.clone();
            match selected {
                Some(run_id) => {
                    let ticket = self.issue(FetchRule::RunResults);
                    out.requests.push(FetchRequest::RunResults { ticket, run_id });
                }
                None => self.clear(FetchRule::RunResults, &mut out),
            }
        }

        let selection = view.file_selection();
        if selection != self.file_diff {
            self.file_diff = selection.clone();
            match selection {
                Some(selection) => {
                    let ticket = self.issue(FetchRule::FileDiff);
                    out.requests.push(FetchRequest::FileDiff { ticket, selection });
                }
                None => self.clear(FetchRule::FileDiff, &mut out),
            }
        }

        out
    }

    /// Re-run the mount rule on the next pass
    pub fn remount(&mut self) {
        self.mounted = false;
    }

    /// Record a three-way key the state moved to without needing a fetch
    ///
    /// Used when the server reports a different current page than the one
    /// requested: the payload for that page is already in hand.
    pub fn acknowledge_three_way(&mut self, key: FileKey) {
        self.three_way = Some(key);
    }

    /// Whether a response with `ticket` should still be applied
    pub fn is_current(&self, rule: FetchRule, ticket: Ticket) -> bool {
        self.current.get(&rule) == Some(&ticket)
    }

    /// Mark a rule's fetch as finished so its ticket is not reused
    pub fn complete(&mut self, rule: FetchRule, ticket: Ticket) {
        if self.is_current(rule, ticket) {
            self.current.remove(&rule);
        }
    }

    pub fn in_flight(&self, rule: FetchRule) -> bool {
        self.current.contains_key(&rule)
    }

    fn issue(&mut self, rule: FetchRule) -> Ticket {
        self.next_ticket += 1;
        self.current.insert(rule, self.next_ticket);
        self.next_ticket
    }

    fn clear(&mut self, rule: FetchRule, out: &mut Reconciled) {
        self.current.remove(&rule);
        out.cleared.push(rule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DisplayFlag;

    fn mounted(view: &ViewState) -> Effects {
        let mut effects = Effects::new();
        let first = effects.reconcile(view);
        assert!(matches!(
            first.requests.as_slice(),
            [FetchRequest::RunLists { .. }]
        ));
        effects
    }

    #[test]
    fn test_mount_fetches_lists_once() {
        let view = ViewState::default();
        let mut effects = mounted(&view);
        assert!(effects.reconcile(&view).is_empty());
    }

    #[test]
    fn test_remount_refetches_lists() {
        let view = ViewState::default();
        let mut effects = mounted(&view);
        effects.remount();
        let out = effects.reconcile(&view);
        assert_eq!(out.requests.len(), 1);
        assert_eq!(out.requests[0].rule(), FetchRule::RunLists);
    }

    #[test]
    fn test_detail_id_triggers_single_fetch() {
        let mut view = ViewState::default();
        let mut effects = mounted(&view);

        view.open_run_detail("r1".into());
        let out = effects.reconcile(&view);
        assert_eq!(out.requests.len(), 1);
        match &out.requests[0] {
            FetchRequest::RunDetail { run_id, kind, .. } => {
                assert_eq!(run_id, "r1");
                assert_eq!(*kind, DetailKind::Content);
            }
            other => panic!("unexpected {other:?}"),
        }

        // unrelated change: no refetch
        view.toggle_flag(DisplayFlag::FileDiff);
        assert!(effects.reconcile(&view).is_empty());
    }

    #[test]
    fn test_clearing_detail_reports_cleared() {
        let mut view = ViewState::default();
        let mut effects = mounted(&view);
        view.open_run_detail("r1".into());
        let ticket = effects.reconcile(&view).requests[0].ticket();

        view.close_detail();
        let out = effects.reconcile(&view);
        assert!(out.requests.is_empty());
        assert_eq!(out.cleared, vec![FetchRule::RunDetail]);
        assert!(!effects.is_current(FetchRule::RunDetail, ticket));
    }

    #[test]
    fn test_page_change_refetches_three_way() {
        let mut view = ViewState::default();
        let mut effects = mounted(&view);
        view.open_file("r1".into(), "doc_1".into(), 1);
        let first = effects.reconcile(&view).requests[0].ticket();

        view.set_file_page(2);
        let out = effects.reconcile(&view);
        match &out.requests[..] {
            [FetchRequest::ThreeWay { ticket, key }] => {
                assert_eq!(key.page, 2);
                assert!(effects.is_current(FetchRule::ThreeWay, *ticket));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!effects.is_current(FetchRule::ThreeWay, first));
    }

    #[test]
    fn test_acknowledged_page_does_not_refetch() {
        let mut view = ViewState::default();
        let mut effects = mounted(&view);
        view.open_file("r1".into(), "doc_1".into(), 5);
        effects.reconcile(&view);

        view.set_file_page(3);
        let key = view.file_key().unwrap();
        effects.acknowledge_three_way(key);
        assert!(effects.reconcile(&view).is_empty());
    }

    #[test]
    fn test_stale_ticket_rejected_after_supersede() {
        let mut view = ViewState::default();
        let mut effects = mounted(&view);
        view.open_run_detail("r1".into());
        let old = effects.reconcile(&view).requests[0].ticket();
        view.open_run_detail("r2".into());
        let new = effects.reconcile(&view).requests[0].ticket();

        assert!(!effects.is_current(FetchRule::RunDetail, old));
        assert!(effects.is_current(FetchRule::RunDetail, new));
        effects.complete(FetchRule::RunDetail, new);
        assert!(!effects.in_flight(FetchRule::RunDetail));
    }

    #[test]
    fn test_selection_rules() {
        let mut view = ViewState::default();
        let mut effects = mounted(&view);

        view.select_file("r1".into(), "doc".into(), "2".into());
        let rules: Vec<FetchRule> = effects
            .reconcile(&view)
            .requests
            .iter()
            .map(FetchRequest::rule)
            .collect();
        assert_eq!(rules, vec![FetchRule::RunResults, FetchRule::FileDiff]);

        view.select_run(None);
        let out = effects.reconcile(&view);
        assert_eq!(out.cleared, vec![FetchRule::RunResults, FetchRule::FileDiff]);
    }

    #[test]
    fn test_switching_detail_kind_changes_three_way_variant() {
        let mut view = ViewState::default();
        let mut effects = mounted(&view);
        view.open_run_detail("r1".into());
        view.open_file("r1".into(), "doc_1".into(), 1);
        effects.reconcile(&view);

        view.open_indentation_detail("r1".into());
        let out = effects.reconcile(&view);
        let three_way = out
            .requests
            .iter()
            .find_map(|r| match r {
                FetchRequest::ThreeWay { key, .. } => Some(key.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(three_way.kind, DetailKind::Indentation);
    }
}
