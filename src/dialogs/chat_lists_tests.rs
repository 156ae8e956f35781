//! Tests for chat list ranking and multi-index maintenance.

use super::*;
use crate::model::{Category, PeerId, UnreadState};
use crate::ranking::{ManualClock, OLD_MESSAGE_SECS};
use std::sync::mpsc::{self, Receiver};

const NOW: i64 = 1_700_000_000;
const DAY: i64 = 86_400;

struct Harness {
    lists: ChatLists,
    events: Receiver<ChatListEvent>,
    clock: ManualClock,
}

fn harness() -> Harness {
    harness_with_pins(Vec::new())
}

fn harness_with_pins(peers: Vec<u64>) -> Harness {
    build(peers, SortKeyEncoder::new())
}

fn build(peers: Vec<u64>, encoder: SortKeyEncoder) -> Harness {
    let (tx, rx) = mpsc::channel();
    let clock = ManualClock::new(NOW);
    let registry = Arc::new(SoftPinRegistry::from_peers(peers.into_iter().map(PeerId::new)));
    let lists = ChatLists::new(
        PriorityClassifier::with_registry(registry),
        Box::new(clock.clone()),
        tx,
    )
    .with_encoder(encoder);
    Harness {
        lists,
        events: rx,
        clock,
    }
}

fn ago(secs: i64) -> TimeId {
    TimeId::new((NOW - secs) as u32)
}

fn read() -> LiveState {
    LiveState::default()
}

fn peer(raw: u64) -> DialogKey {
    DialogKey::Peer(PeerId::new(raw))
}

impl Harness {
    fn drain(&self) -> Vec<ChatListEvent> {
        self.events.try_iter().collect()
    }

    fn dialog(&mut self, raw: u64, name: &str, sent_ago: i64, state: LiveState) -> EntryId {
        let id = self.lists.register(peer(raw), name, None);
        self.lists.update_state(id, state);
        self.lists.touch_last_message_time(id, ago(sent_ago));
        id
    }

    fn order(&self, mode: ListMode) -> Vec<EntryId> {
        self.lists.ordered(None, mode)
    }

    fn key(&self, id: EntryId) -> u64 {
        self.lists.entry(id).expect("entry").cached_sort_key()
    }
}

// ===== Membership =====

#[test]
fn touched_dialog_is_added_to_every_mode_once() {
    // GIVEN a registered, unmuted dialog
    let mut h = harness();
    let id = h.lists.register(peer(1), "Alice", None);
    assert!(h.drain().is_empty());
    assert_eq!(h.key(id), 0);

    // WHEN it gets its first message time
    h.lists.touch_last_message_time(id, ago(60));

    // THEN it is shown in both modes exactly once
    let events = h.drain();
    assert_eq!(
        events,
        vec![
            ChatListEvent::Added {
                key: peer(1),
                folder: None,
                mode: ListMode::All,
                position: 0,
            },
            ChatListEvent::Added {
                key: peer(1),
                folder: None,
                mode: ListMode::Important,
                position: 0,
            },
        ]
    );
    assert!(h.lists.is_in_list(id, ListMode::All));
    assert!(h.lists.is_in_list(id, ListMode::Important));
    assert_ne!(h.key(id), 0);
}

#[test]
fn sort_key_is_idempotent_and_silent() {
    let mut h = harness();
    let id = h.dialog(1, "Alice", 60, read());
    h.drain();

    let first = h.lists.sort_key(id);
    let second = h.lists.sort_key(id);

    assert_eq!(first, second);
    assert!(h.drain().is_empty(), "no-op recompute must not emit events");
}

#[test]
fn add_then_remove_restores_unlisted_state() {
    // GIVEN an ineligible dialog with a known message time
    let mut h = harness();
    let hidden = LiveState {
        eligible: false,
        ..read()
    };
    let id = h.dialog(1, "Zed Quinn", 60, hidden);
    assert_eq!(h.key(id), 0);
    assert!(h.drain().iter().all(|e| !e.is_existence_change()));

    // WHEN it is explicitly added and removed again
    assert!(h.lists.add_to_list(id, ListMode::All));
    assert!(!h.lists.add_to_list(id, ListMode::All), "second add is a no-op");
    assert_ne!(h.key(id), 0);
    assert!(h.lists.remove_from_list(id, ListMode::All));
    assert!(!h.lists.remove_from_list(id, ListMode::All), "second remove is a no-op");

    // THEN key, membership and letter registrations are gone
    let entry = h.lists.entry(id).expect("entry");
    assert_eq!(entry.cached_sort_key(), 0);
    assert!(!entry.in_any_chat_list());
    assert!(entry.links(ListMode::All).is_empty());
    let list = h.lists.list(None, ListMode::All).expect("list created");
    assert!(list.is_empty());
    assert_eq!(list.letters().count(), 0);

    let existence: Vec<_> = h.drain().into_iter().filter(|e| e.is_existence_change()).collect();
    assert_eq!(existence.len(), 2, "one Added and one Removed");
}

#[test]
fn unknown_time_is_never_listed() {
    let mut h = harness();
    let id = h.lists.register(peer(1), "Alice", None);
    h.lists.update_state(
        id,
        LiveState {
            unread_count: Some(3),
            ..read()
        },
    );

    assert_eq!(h.lists.sort_key(id), 0);
    assert!(!h.lists.add_to_list(id, ListMode::All));
    assert!(!h.lists.is_in_list(id, ListMode::All));
}

#[test]
fn muted_dialog_joins_important_when_unmuted() {
    let mut h = harness();
    let muted = LiveState {
        muted: true,
        ..read()
    };
    let id = h.dialog(1, "Noisy group", 60, muted);
    assert!(h.lists.is_in_list(id, ListMode::All));
    assert!(!h.lists.is_in_list(id, ListMode::Important));
    h.drain();

    let changed = h.lists.update_state(id, read());

    assert!(changed);
    assert!(h.lists.is_in_list(id, ListMode::Important));
    let events = h.drain();
    assert!(events.contains(&ChatListEvent::Added {
        key: peer(1),
        folder: None,
        mode: ListMode::Important,
        position: 0,
    }));
    assert!(events.contains(&ChatListEvent::UnreadStateChanged {
        key: peer(1),
        was: UnreadState {
            unread_count: Some(0),
            muted: true,
            unread_mention: false,
            unread_mark: false,
        },
        now: read().unread_view(),
    }));
}

#[test]
fn forget_removes_every_row() {
    let mut h = harness();
    let id = h.dialog(1, "Alice", 60, read());
    h.drain();

    let entry = h.lists.forget(id).expect("registered");

    assert_eq!(entry.cached_sort_key(), 0);
    assert_eq!(h.lists.find(peer(1)), None);
    assert!(h.order(ListMode::All).is_empty());
    assert_eq!(h.drain().len(), 2);
    assert!(h.lists.forget(id).is_none());
}

#[test]
#[should_panic(expected = "is not in the")]
fn position_of_absent_entry_panics() {
    let mut h = harness();
    let id = h.lists.register(peer(1), "Alice", None);
    h.lists.position(id, ListMode::All);
}

// ===== Ordering =====

#[test]
fn categories_follow_canonical_precedence() {
    // GIVEN one dialog per category
    let mut h = harness_with_pins(vec![1]);
    let bottom = h.dialog(
        6,
        "bottom",
        60,
        LiveState {
            unread_count: None,
            ..read()
        },
    );
    let old = h.dialog(5, "old", 8 * DAY, read());
    let muted = h.dialog(
        4,
        "muted",
        60,
        LiveState {
            muted: true,
            ..read()
        },
    );
    let young = h.dialog(3, "young", 60, read());
    let unread = h.dialog(
        2,
        "unread",
        60,
        LiveState {
            unread_count: Some(2),
            ..read()
        },
    );
    let soft = h.dialog(1, "soft", 60, read());

    // THEN the list order is the tier order, muted above old read chats
    assert_eq!(
        h.order(ListMode::All),
        vec![soft, unread, young, muted, old, bottom]
    );
    assert_eq!(h.lists.entry(soft).map(Entry::category), Some(Category::SoftPinned));
    assert_eq!(h.lists.entry(bottom).map(Entry::category), Some(Category::Bottom));
}

#[test]
fn equal_timestamps_get_distinct_keys() {
    let mut h = harness();
    let ids: Vec<EntryId> = (1..=5).map(|raw| h.dialog(raw, "same", 60, read())).collect();

    let keys: HashSet<u64> = ids.iter().map(|id| h.key(*id)).collect();
    assert_eq!(keys.len(), ids.len());
    // Later draws rank higher.
    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(h.order(ListMode::All), expected);
}

#[test]
fn new_message_moves_dialog_to_top_of_its_tier() {
    let mut h = harness();
    let a = h.dialog(1, "a", 300, read());
    let b = h.dialog(2, "b", 200, read());
    let c = h.dialog(3, "c", 100, read());
    assert_eq!(h.order(ListMode::All), vec![c, b, a]);
    h.drain();

    h.lists.touch_last_message_time(a, ago(0));

    assert_eq!(h.order(ListMode::All), vec![a, c, b]);
    assert!(h.drain().contains(&ChatListEvent::Moved {
        key: peer(1),
        folder: None,
        mode: ListMode::All,
        change: PositionChange::new(2, 0),
    }));
}

#[test]
fn stale_touch_on_absent_entry_is_dropped() {
    let mut h = harness();
    let hidden = LiveState {
        eligible: false,
        ..read()
    };
    let id = h.dialog(1, "ghost", 100, hidden);

    assert!(!h.lists.touch_last_message_time(id, ago(200)));
    assert!(!h.lists.touch_last_message_time(id, ago(100)));
    assert_eq!(h.lists.entry(id).map(Entry::last_message_time), Some(ago(100)));
    assert!(h.lists.touch_last_message_time(id, ago(50)));
}

#[test]
fn older_touch_on_listed_entry_is_applied() {
    let mut h = harness();
    let a = h.dialog(1, "a", 100, read());
    let b = h.dialog(2, "b", 200, read());
    assert_eq!(h.order(ListMode::All), vec![a, b]);

    assert!(h.lists.touch_last_message_time(a, ago(300)));

    assert_eq!(h.order(ListMode::All), vec![b, a]);
}

#[test]
fn aging_past_threshold_drops_below_muted() {
    let mut h = harness();
    let young = h.dialog(1, "young", 60, read());
    let muted = h.dialog(
        2,
        "muted",
        30,
        LiveState {
            muted: true,
            ..read()
        },
    );
    assert_eq!(h.order(ListMode::All), vec![young, muted]);

    h.clock.advance(i64::from(OLD_MESSAGE_SECS));
    h.lists.rerank_all();

    assert_eq!(
        h.lists.entry(young).map(Entry::category),
        Some(Category::UnmutedReadOld)
    );
    assert_eq!(h.order(ListMode::All), vec![muted, young]);
}

// ===== Pins and promotion =====

#[test]
fn pin_lifts_bottom_entry_and_unpin_reverts() {
    let mut h = harness();
    let top = h.dialog(1, "top", 10, read());
    let unknown = LiveState {
        unread_count: None,
        ..read()
    };
    let bottom = h.dialog(2, "bottom", 60, unknown);
    assert_eq!(h.order(ListMode::All), vec![top, bottom]);

    h.lists.set_pinned_index(bottom, Some(1));
    assert!(h.key(bottom) >= 0xFFFF_FFFF_0000_0000);
    assert_eq!(h.order(ListMode::All), vec![bottom, top]);

    h.lists.set_pinned_index(bottom, None);
    assert!(h.key(bottom) < 1 << 60, "back in the bottom tier");
    assert_eq!(h.order(ListMode::All), vec![top, bottom]);
}

#[test]
fn pin_hook_fires_only_on_pinned_transitions() {
    let mut h = harness();
    let id = h.dialog(1, "a", 60, read());
    h.drain();

    let pin_events = |events: Vec<ChatListEvent>| -> Vec<bool> {
        events
            .into_iter()
            .filter_map(|e| match e {
                ChatListEvent::PinnedChanged { pinned, .. } => Some(pinned),
                _ => None,
            })
            .collect()
    };

    h.lists.set_pinned_index(id, Some(1));
    assert_eq!(pin_events(h.drain()), vec![true]);
    h.lists.set_pinned_index(id, Some(2));
    assert_eq!(pin_events(h.drain()), Vec::<bool>::new());
    h.lists.set_pinned_index(id, None);
    assert_eq!(pin_events(h.drain()), vec![false]);
}

#[test]
fn promoted_outranks_pins_and_unpromoting_can_remove() {
    let mut h = harness();
    let pinned = h.dialog(1, "pinned", 60, read());
    h.lists.set_pinned_index(pinned, Some(1));
    let sponsor = h.dialog(
        2,
        "sponsor",
        60,
        LiveState {
            eligible: false,
            ..read()
        },
    );
    assert!(!h.lists.is_in_list(sponsor, ListMode::All));

    h.lists.set_promoted(sponsor, true);
    assert_eq!(h.order(ListMode::All), vec![sponsor, pinned]);
    assert!(h.key(sponsor) > h.key(pinned));
    h.drain();

    h.lists.set_promoted(sponsor, false);
    assert!(!h.lists.is_in_list(sponsor, ListMode::All));
    assert_eq!(h.key(sponsor), 0);
    let removed = h
        .drain()
        .into_iter()
        .filter(|e| matches!(e, ChatListEvent::Removed { .. }))
        .count();
    assert_eq!(removed, 2);
}

#[test]
fn reorder_pinned_assigns_contiguous_slots() {
    let mut h = harness();
    let a = h.dialog(1, "a", 30, read());
    let b = h.dialog(2, "b", 20, read());
    let c = h.dialog(3, "c", 10, read());

    h.lists.reorder_pinned(None, &[c, a]);
    assert_eq!(h.lists.pinned_order(None), vec![c, a]);
    assert_eq!(h.lists.entry(c).and_then(Entry::pinned_index), Some(1));
    assert_eq!(h.lists.entry(a).and_then(Entry::pinned_index), Some(2));
    assert_eq!(h.order(ListMode::All), vec![c, a, b]);

    h.lists.reorder_pinned(None, &[b]);
    assert_eq!(h.lists.pinned_order(None), vec![b]);
    assert_eq!(h.lists.entry(c).and_then(Entry::pinned_index), None);
}

#[test]
fn pinning_a_taken_slot_moves_holders_down() {
    let mut h = harness();
    let a = h.dialog(1, "a", 30, read());
    let b = h.dialog(2, "b", 20, read());
    let c = h.dialog(3, "c", 10, read());
    let d = h.dialog(4, "d", 5, read());
    h.lists.set_pinned_index(a, Some(1));
    h.lists.set_pinned_index(b, Some(2));
    h.lists.set_pinned_index(d, Some(5));
    h.drain();

    h.lists.set_pinned_index(c, Some(1));

    let slot_of = |h: &Harness, id| h.lists.entry(id).and_then(Entry::pinned_index);
    assert_eq!(slot_of(&h, c), Some(1));
    assert_eq!(slot_of(&h, a), Some(2));
    assert_eq!(slot_of(&h, b), Some(3));
    assert_eq!(slot_of(&h, d), Some(5), "gap stops the shift");
    assert_eq!(h.lists.pinned_order(None), vec![c, a, b, d]);
    assert_eq!(h.order(ListMode::All), vec![c, a, b, d]);
    assert!(h.key(c) > h.key(a) && h.key(a) > h.key(b));

    let pinned_events: Vec<DialogKey> = h
        .drain()
        .into_iter()
        .filter(|e| matches!(e, ChatListEvent::PinnedChanged { .. }))
        .map(|e| e.key())
        .collect();
    assert_eq!(pinned_events, vec![peer(3)], "shifted holders stay pinned");
}

#[test]
fn repinning_into_own_neighbour_slot_swaps_places() {
    let mut h = harness();
    let a = h.dialog(1, "a", 30, read());
    let b = h.dialog(2, "b", 20, read());
    h.lists.reorder_pinned(None, &[a, b]);

    h.lists.reorder_pinned(None, &[b, a]);

    assert_eq!(h.lists.pinned_order(None), vec![b, a]);
    assert_eq!(h.lists.entry(b).and_then(Entry::pinned_index), Some(1));
    assert_eq!(h.lists.entry(a).and_then(Entry::pinned_index), Some(2));
    assert_ne!(h.key(a), h.key(b));
}

#[test]
fn pin_slots_are_per_container() {
    let mut h = harness();
    let folder = FolderId::new(4);
    let root = h.dialog(1, "root", 20, read());
    let inside = h.dialog(2, "inside", 10, read());
    h.lists.set_pinned_index(root, Some(1));
    h.lists.set_pinned_index(inside, Some(1));
    assert_eq!(h.lists.entry(root).and_then(Entry::pinned_index), Some(2));
    h.lists.set_pinned_index(root, Some(1));
    h.lists.move_to_folder(inside, Some(folder));
    h.lists.set_pinned_index(inside, Some(1));

    assert_eq!(h.lists.entry(root).and_then(Entry::pinned_index), Some(1));
    assert_eq!(h.lists.entry(inside).and_then(Entry::pinned_index), Some(1));

    h.lists.move_to_folder(inside, None);
    assert_eq!(h.lists.entry(inside).and_then(Entry::pinned_index), Some(1));
    assert_eq!(h.lists.entry(root).and_then(Entry::pinned_index), Some(2));
    assert_eq!(h.order(ListMode::All), vec![inside, root]);
}

#[test]
fn promoted_entries_get_distinct_slots() {
    let mut h = harness();
    let a = h.dialog(1, "a", 30, read());
    let b = h.dialog(2, "b", 20, read());
    let c = h.dialog(3, "c", 10, read());

    h.lists.set_promoted(a, true);
    h.lists.set_promoted(b, true);
    assert_eq!(h.lists.entry(a).and_then(Entry::fixed_on_top_index), Some(PROMOTED_SLOT));
    assert_eq!(h.lists.entry(b).and_then(Entry::fixed_on_top_index), Some(PROMOTED_SLOT + 1));
    assert_ne!(h.key(a), h.key(b));
    assert_eq!(h.order(ListMode::All), vec![a, b, c]);

    // A released slot is reused by the next promotion.
    h.lists.set_promoted(a, false);
    h.lists.set_promoted(c, true);
    assert_eq!(h.lists.entry(c).and_then(Entry::fixed_on_top_index), Some(PROMOTED_SLOT));
    assert_eq!(h.order(ListMode::All), vec![c, b, a]);
}

#[test]
fn promotion_is_ignored_when_fixed_slots_run_out() {
    let mut h = harness();
    let slots = (MAX_FIXED_ON_TOP_SLOT - PROMOTED_SLOT + 1) as u64;
    let ids: Vec<EntryId> = (0..=slots)
        .map(|raw| h.dialog(raw, "p", 10 + raw as i64, read()))
        .collect();

    for id in &ids {
        h.lists.set_promoted(*id, true);
    }

    let (promoted, overflow) = ids.split_at(slots as usize);
    assert!(promoted
        .iter()
        .all(|id| h.lists.entry(*id).is_some_and(Entry::is_promoted)));
    assert!(!h.lists.entry(overflow[0]).is_some_and(Entry::is_promoted));
    let keys: HashSet<u64> = promoted.iter().map(|id| h.key(*id)).collect();
    assert_eq!(keys.len(), promoted.len());
}

#[test]
fn replacing_soft_pins_reranks() {
    let mut h = harness();
    let a = h.dialog(1, "a", 10, read());
    let b = h.dialog(2, "b", 20, read());
    assert_eq!(h.order(ListMode::All), vec![a, b]);

    h.lists
        .replace_soft_pins(Arc::new(SoftPinRegistry::from_peers([PeerId::new(2)])));

    assert_eq!(h.order(ListMode::All), vec![b, a]);
    assert_eq!(h.lists.entry(b).map(Entry::category), Some(Category::SoftPinned));
}

#[test]
fn adjust_position_without_change_stays_put() {
    let mut h = harness();
    let a = h.dialog(1, "a", 10, read());
    h.dialog(2, "b", 20, read());

    let change = h.lists.adjust_position(a, ListMode::All);
    assert_eq!(change, PositionChange::new(0, 0));
    assert!(!change.moved());
}

// ===== Tie-breakers =====

const LAST_DRAW: u64 = (1 << 28) - 1;

#[test]
fn exhausted_counter_renumbers_and_later_touch_still_wins() {
    let mut h = build(Vec::new(), SortKeyEncoder::with_counter(LAST_DRAW - 1));
    let a = h.dialog(1, "alpha", 60, read());
    assert_eq!(h.key(a) & LAST_DRAW, LAST_DRAW);
    let before = h.key(a);
    h.drain();

    let b = h.dialog(2, "beta", 60, read());

    assert!(h.key(b) > h.key(a), "later touch on the same date ranks higher");
    assert_eq!(h.order(ListMode::All), vec![b, a]);
    assert_eq!(h.key(a) >> 28, before >> 28, "tier and date survive renumbering");
    assert_eq!(h.key(a) & LAST_DRAW, 1);

    let list = h.lists.list(None, ListMode::All).expect("root list");
    assert_eq!(list.main().row(a).map(Row::sort_key), Some(h.key(a)));
    let bucket = list.bucket(Letter::new('a').expect("letter")).expect("bucket");
    assert_eq!(bucket.row(a).map(Row::sort_key), Some(h.key(a)));

    assert!(
        h.drain().iter().all(|e| e.key() != peer(1)),
        "renumbering moves no row"
    );
}

#[test]
fn renumbering_keeps_cross_tier_order() {
    let mut h = build(Vec::new(), SortKeyEncoder::with_counter(LAST_DRAW - 3));
    let unread = LiveState {
        unread_count: Some(2),
        ..read()
    };
    let a = h.dialog(1, "a", 60, unread);
    let b = h.dialog(2, "b", 60, read());
    let c = h.dialog(3, "c", 60, read());
    assert_eq!(h.order(ListMode::All), vec![a, c, b]);

    let d = h.dialog(4, "d", 60, read());
    h.lists.touch_last_message_time(b, ago(60));

    assert_eq!(h.order(ListMode::All), vec![a, b, d, c]);
    let keys: Vec<u64> = h.order(ListMode::All).into_iter().map(|id| h.key(id)).collect();
    assert!(keys.windows(2).all(|pair| pair[0] > pair[1]));
}

// ===== Search and names =====

#[test]
fn filtered_matches_word_prefixes_in_list_order() {
    let mut h = harness();
    let john = h.dialog(1, "John Doe", 30, read());
    let joanna = h.dialog(2, "Joanna", 20, read());
    let bob = h.dialog(3, "Bob Jones", 10, read());

    assert_eq!(h.lists.filtered(None, ListMode::All, "jo"), vec![bob, joanna, john]);
    assert_eq!(h.lists.filtered(None, ListMode::All, "doe"), vec![john]);
    assert_eq!(h.lists.filtered(None, ListMode::All, "Jo  DO"), vec![john]);
    assert!(h.lists.filtered(None, ListMode::All, "x").is_empty());
    assert_eq!(h.lists.filtered(None, ListMode::All, "  ").len(), 3);
}

#[test]
fn rename_updates_letter_buckets() {
    let mut h = harness();
    let bob = h.dialog(1, "Bob", 10, read());
    h.drain();

    h.lists.set_name(bob, "Robert");

    assert!(h.lists.filtered(None, ListMode::All, "bob").is_empty());
    assert_eq!(h.lists.filtered(None, ListMode::All, "rob"), vec![bob]);
    assert!(h
        .drain()
        .iter()
        .all(|e| matches!(e, ChatListEvent::Repaint { .. })));
}

// ===== Folders =====

#[test]
fn folder_children_rank_in_folder_and_raise_folder_time() {
    let mut h = harness();
    let folder = FolderId::new(1);
    let archive = h.lists.register(DialogKey::Folder(folder), "Archive", None);
    let outside = h.dialog(9, "outside", 100, read());

    let child = h.lists.register(peer(1), "child", Some(folder));
    h.lists.touch_last_message_time(child, ago(10));

    assert_eq!(h.lists.ordered(Some(folder), ListMode::All), vec![child]);
    assert_eq!(h.order(ListMode::All), vec![archive, outside]);
    assert_eq!(
        h.lists.entry(archive).map(Entry::last_message_time),
        Some(ago(10))
    );
}

#[test]
fn moving_to_folder_changes_container() {
    let mut h = harness();
    let folder = FolderId::new(3);
    let id = h.dialog(1, "a", 10, read());

    h.lists.move_to_folder(id, Some(folder));

    assert!(h.order(ListMode::All).is_empty());
    assert_eq!(h.lists.ordered(Some(folder), ListMode::All), vec![id]);
    assert_eq!(h.lists.entry(id).and_then(Entry::folder), Some(folder));
}

#[test]
fn dropped_receiver_does_not_break_mutations() {
    let mut h = harness();
    let Harness { lists, events, .. } = &mut h;
    let id = lists.register(peer(1), "a", None);
    drop(std::mem::replace(events, mpsc::channel().1));

    assert!(lists.touch_last_message_time(id, ago(1)));
    assert!(lists.is_in_list(id, ListMode::All));
}
