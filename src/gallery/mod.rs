// SPDX-License-Identifier: MPL-2.0
//! Featured-image rotation and selection.
//!
//! [`GalleryController`] owns the fetched image list and decides which record
//! is featured. It performs no I/O itself: operations that need the network
//! return [`Effect::Fetch`] and the application runs the request, then hands
//! the outcome back through [`GalleryController::apply_fetch`].
//!
//! Lifecycle: `Empty` until the first non-empty fetch result, then `Loaded`
//! (rotation, selection and removal are self-transitions), and `Stopped`
//! after [`GalleryController::teardown`], from which nothing changes anymore.

mod record;

pub use record::ImageRecord;

use crate::error::Error;
use rand::Rng;
use std::collections::HashSet;

/// Coarse lifecycle of the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing fetched yet.
    #[default]
    Empty,
    /// At least one fetch populated the list.
    Loaded,
    /// Torn down; the rotation timer is released.
    Stopped,
}

/// Side effect requested by a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Effect {
    /// No effect.
    None,
    /// Request the trending list from the image source.
    Fetch,
}

/// What [`GalleryController::apply_fetch`] did with a fetch result.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The list was populated and the first record featured.
    Applied { count: usize },
    /// The source answered with no usable records.
    NoRecords,
    /// The fetch failed; the gallery keeps waiting for the next tick.
    Failed(Error),
    /// The list was already populated by an earlier fetch.
    Discarded,
    /// The gallery was torn down before the result arrived.
    Ignored,
}

/// What the featured-image slot should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeaturedSlot<'a> {
    /// Render nothing.
    Hidden,
    /// Render the image at `url`. `key` changes only when the featured record
    /// changes through rotation or a fresh fetch.
    Image { url: &'a str, key: Option<&'a str> },
}

/// User intent forwarded from the thumbnail list.
pub trait GalleryActions {
    /// Feature the image at `url`.
    fn select_image(&mut self, url: String);
    /// Drop the record with `id` from the list.
    fn remove_image(&mut self, id: &str);
}

/// Gallery state plus the operations allowed to change it.
#[derive(Debug, Default)]
pub struct GalleryController {
    images: Vec<ImageRecord>,
    featured_url: Option<String>,
    featured_id: Option<String>,
    loaded: bool,
    phase: Phase,
    ticking: bool,
    fetches_in_flight: u32,
    last_error: Option<Error>,
}

impl GalleryController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the gallery: issues the first fetch and arms the rotation timer.
    ///
    /// Only the first call has an effect.
    pub fn initialize(&mut self) -> Effect {
        if self.phase != Phase::Empty || self.ticking {
            return Effect::None;
        }
        self.ticking = true;
        log::info!("gallery started");
        self.issue_fetch()
    }

    /// Handles one rotation period.
    ///
    /// With an empty list a fetch is requested, even if another one is still
    /// in flight. Otherwise a record is featured uniformly at random; the
    /// current one may be picked again.
    pub fn on_tick<R: Rng>(&mut self, rng: &mut R) -> Effect {
        if !self.ticking {
            return Effect::None;
        }

        if self.images.is_empty() {
            return self.issue_fetch();
        }

        let index = rng.random_range(0..self.images.len());
        let record = &self.images[index];
        self.featured_url = Some(record.featured_url.clone());
        self.featured_id = Some(record.id.clone());
        Effect::None
    }

    /// Applies the result of a fetch requested through [`Effect::Fetch`].
    ///
    /// The first non-empty result wins; later ones are discarded so records
    /// the user removed in the meantime do not come back.
    pub fn apply_fetch(&mut self, result: Result<Vec<ImageRecord>, Error>) -> FetchOutcome {
        if self.phase == Phase::Stopped {
            return FetchOutcome::Ignored;
        }
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);

        let records = match result {
            Ok(records) => records,
            Err(err) => {
                log::warn!("trending fetch failed: {}", err);
                self.last_error = Some(err.clone());
                return FetchOutcome::Failed(err);
            }
        };

        if !self.images.is_empty() {
            log::debug!(
                "discarding {} records from a concurrent fetch",
                records.len()
            );
            return FetchOutcome::Discarded;
        }

        let records = dedup_by_id(records);
        let Some(first) = records.first() else {
            log::info!("trending fetch returned no records");
            return FetchOutcome::NoRecords;
        };

        self.featured_url = Some(first.featured_url.clone());
        self.featured_id = Some(first.id.clone());
        self.images = records;
        self.loaded = true;
        self.phase = Phase::Loaded;
        self.last_error = None;

        log::info!("gallery loaded {} records", self.images.len());
        FetchOutcome::Applied {
            count: self.images.len(),
        }
    }

    /// Features `url` directly. The transition key is left untouched.
    pub fn select_image(&mut self, url: impl Into<String>) {
        if self.phase == Phase::Stopped {
            return;
        }
        self.featured_url = Some(url.into());
    }

    /// Removes the record with `id`, if present. The featured image stays
    /// as it is until the next rotation or selection.
    pub fn remove_image(&mut self, id: &str) {
        if self.phase == Phase::Stopped {
            return;
        }
        self.images.retain(|record| record.id != id);
    }

    /// Releases the rotation timer. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.phase == Phase::Stopped {
            return;
        }
        self.phase = Phase::Stopped;
        self.ticking = false;
        log::info!(
            "gallery stopped ({} fetches still in flight)",
            self.fetches_in_flight
        );
    }

    /// Rendering rule for the featured slot.
    #[must_use]
    pub fn featured_slot(&self) -> FeaturedSlot<'_> {
        if self.images.is_empty() {
            return FeaturedSlot::Hidden;
        }
        match (self.loaded, self.featured_url.as_deref()) {
            (true, Some(url)) => FeaturedSlot::Image {
                url,
                key: self.featured_id.as_deref(),
            },
            _ => FeaturedSlot::Hidden,
        }
    }

    #[must_use]
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    #[must_use]
    pub fn featured_url(&self) -> Option<&str> {
        self.featured_url.as_deref()
    }

    #[must_use]
    pub fn featured_id(&self) -> Option<&str> {
        self.featured_id.as_deref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the rotation timer should be running.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    #[must_use]
    pub fn fetches_in_flight(&self) -> u32 {
        self.fetches_in_flight
    }

    /// Error of the most recent failed fetch, cleared by a successful one.
    #[must_use]
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    fn issue_fetch(&mut self) -> Effect {
        self.fetches_in_flight += 1;
        if self.fetches_in_flight > 1 {
            log::debug!("{} trending fetches in flight", self.fetches_in_flight);
        }
        Effect::Fetch
    }
}

impl GalleryActions for GalleryController {
    fn select_image(&mut self, url: String) {
        GalleryController::select_image(self, url);
    }

    fn remove_image(&mut self, id: &str) {
        GalleryController::remove_image(self, id);
    }
}

/// Keeps the first record for every id, preserving response order.
fn dedup_by_id(records: Vec<ImageRecord>) -> Vec<ImageRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(id: &str) -> ImageRecord {
        ImageRecord::new(id, id.to_uppercase(), format!("p{id}"), format!("f{id}"))
    }

    fn loaded(ids: &[&str]) -> GalleryController {
        let mut gallery = GalleryController::new();
        assert_eq!(gallery.initialize(), Effect::Fetch);
        let outcome = gallery.apply_fetch(Ok(ids.iter().map(|id| record(id)).collect()));
        assert!(matches!(outcome, FetchOutcome::Applied { .. }));
        gallery
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn new_gallery_is_empty_and_not_loaded() {
        let gallery = GalleryController::new();
        assert_eq!(gallery.phase(), Phase::Empty);
        assert!(gallery.images().is_empty());
        assert!(!gallery.is_loaded());
        assert!(!gallery.is_ticking());
        assert_eq!(gallery.featured_slot(), FeaturedSlot::Hidden);
    }

    #[test]
    fn initialize_requests_fetch_once() {
        let mut gallery = GalleryController::new();
        assert_eq!(gallery.initialize(), Effect::Fetch);
        assert!(gallery.is_ticking());
        assert_eq!(gallery.initialize(), Effect::None);
        assert_eq!(gallery.fetches_in_flight(), 1);
    }

    #[test]
    fn first_fetch_features_first_record() {
        let gallery = loaded(&["a", "b"]);

        assert_eq!(gallery.phase(), Phase::Loaded);
        assert!(gallery.is_loaded());
        assert_eq!(gallery.featured_url(), Some("fa"));
        assert_eq!(gallery.featured_id(), Some("a"));
        assert_eq!(gallery.fetches_in_flight(), 0);
        assert_eq!(
            gallery.featured_slot(),
            FeaturedSlot::Image {
                url: "fa",
                key: Some("a")
            }
        );
    }

    #[test]
    fn select_image_keeps_transition_key() {
        let mut gallery = loaded(&["a", "b"]);

        gallery.select_image("fb");

        assert_eq!(gallery.featured_url(), Some("fb"));
        assert_eq!(gallery.featured_id(), Some("a"));
    }

    #[test]
    fn removing_featured_record_keeps_featured_url() {
        let mut gallery = loaded(&["a", "b"]);

        gallery.remove_image("a");

        assert!(gallery.images().iter().all(|r| r.id != "a"));
        assert_eq!(gallery.images().len(), 1);
        assert_eq!(gallery.featured_url(), Some("fa"));
        assert_eq!(gallery.featured_id(), Some("a"));
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let mut gallery = loaded(&["a", "b"]);
        gallery.remove_image("zzz");
        assert_eq!(gallery.images().len(), 2);
    }

    #[test]
    fn removal_never_leaves_the_removed_id() {
        let ids = ["a", "b", "c", "d"];
        for id in ids {
            let mut gallery = loaded(&ids);
            gallery.remove_image(id);
            assert!(gallery.images().iter().all(|r| r.id != id));
            assert_eq!(gallery.images().len(), ids.len() - 1);
        }
    }

    #[test]
    fn tick_features_a_current_record() {
        let mut gallery = loaded(&["a", "b", "c"]);
        let mut rng = rng();

        for _ in 0..200 {
            assert_eq!(gallery.on_tick(&mut rng), Effect::None);
            let url = gallery.featured_url().unwrap();
            let id = gallery.featured_id().unwrap();
            let record = gallery
                .images()
                .iter()
                .find(|r| r.featured_url == url)
                .expect("featured url must belong to a record");
            assert_eq!(record.id, id);
        }
    }

    #[test]
    fn tick_reaches_every_record() {
        let mut gallery = loaded(&["a", "b", "c"]);
        let mut rng = rng();
        let mut seen = HashSet::new();

        for _ in 0..300 {
            let _ = gallery.on_tick(&mut rng);
            seen.insert(gallery.featured_id().unwrap().to_string());
        }

        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn tick_after_removal_only_picks_remaining_records() {
        let mut gallery = loaded(&["a", "b", "c"]);
        gallery.remove_image("b");
        let mut rng = rng();

        for _ in 0..100 {
            let _ = gallery.on_tick(&mut rng);
            assert_ne!(gallery.featured_id(), Some("b"));
            assert_ne!(gallery.featured_url(), Some("fb"));
        }
    }

    #[test]
    fn tick_with_single_record_repeats_it() {
        let mut gallery = loaded(&["a"]);
        let mut rng = rng();
        let _ = gallery.on_tick(&mut rng);
        assert_eq!(gallery.featured_id(), Some("a"));
    }

    #[test]
    fn tick_on_empty_gallery_requests_fetch() {
        let mut gallery = GalleryController::new();
        let _ = gallery.initialize();
        let mut rng = rng();

        assert_eq!(gallery.on_tick(&mut rng), Effect::Fetch);
        assert_eq!(gallery.fetches_in_flight(), 2);
    }

    #[test]
    fn tick_on_populated_gallery_does_not_fetch() {
        let mut gallery = loaded(&["a"]);
        let mut rng = rng();
        assert_eq!(gallery.on_tick(&mut rng), Effect::None);
        assert_eq!(gallery.fetches_in_flight(), 0);
    }

    #[test]
    fn tick_after_removing_everything_fetches_again() {
        let mut gallery = loaded(&["a"]);
        gallery.remove_image("a");
        let mut rng = rng();

        assert_eq!(gallery.featured_slot(), FeaturedSlot::Hidden);
        assert_eq!(gallery.on_tick(&mut rng), Effect::Fetch);

        let outcome = gallery.apply_fetch(Ok(vec![record("x")]));
        assert_eq!(outcome, FetchOutcome::Applied { count: 1 });
        assert_eq!(gallery.featured_id(), Some("x"));
    }

    #[test]
    fn tick_before_initialize_does_nothing() {
        let mut gallery = GalleryController::new();
        let mut rng = rng();
        assert_eq!(gallery.on_tick(&mut rng), Effect::None);
        assert_eq!(gallery.fetches_in_flight(), 0);
    }

    #[test]
    fn concurrent_fetches_keep_the_first_result() {
        let mut gallery = GalleryController::new();
        let mut rng = rng();
        let _ = gallery.initialize();
        // Two ticks inside the fetch latency window.
        assert_eq!(gallery.on_tick(&mut rng), Effect::Fetch);
        assert_eq!(gallery.fetches_in_flight(), 2);

        let first = gallery.apply_fetch(Ok(vec![record("a"), record("b")]));
        gallery.remove_image("b");
        let second = gallery.apply_fetch(Ok(vec![record("b"), record("c")]));

        assert_eq!(first, FetchOutcome::Applied { count: 2 });
        assert_eq!(second, FetchOutcome::Discarded);
        assert_eq!(gallery.images(), &[record("a")]);
        assert_eq!(gallery.fetches_in_flight(), 0);
    }

    #[test]
    fn failed_fetch_stays_empty_and_remembers_error() {
        let mut gallery = GalleryController::new();
        let _ = gallery.initialize();

        let err = Error::Network(NetworkError::Timeout);
        let outcome = gallery.apply_fetch(Err(err.clone()));

        assert_eq!(outcome, FetchOutcome::Failed(err.clone()));
        assert_eq!(gallery.phase(), Phase::Empty);
        assert!(!gallery.is_loaded());
        assert_eq!(gallery.last_error(), Some(&err));

        // The next tick is the retry path.
        let mut rng = rng();
        assert_eq!(gallery.on_tick(&mut rng), Effect::Fetch);
        let _ = gallery.apply_fetch(Ok(vec![record("a")]));
        assert!(gallery.last_error().is_none());
    }

    #[test]
    fn empty_fetch_result_stays_empty() {
        let mut gallery = GalleryController::new();
        let _ = gallery.initialize();

        assert_eq!(gallery.apply_fetch(Ok(Vec::new())), FetchOutcome::NoRecords);
        assert_eq!(gallery.phase(), Phase::Empty);
        assert!(gallery.featured_url().is_none());
    }

    #[test]
    fn duplicate_ids_are_collapsed() {
        let mut gallery = GalleryController::new();
        let _ = gallery.initialize();
        let mut dup = record("a");
        dup.title = "second".into();

        let _ = gallery.apply_fetch(Ok(vec![record("a"), record("b"), dup]));

        assert_eq!(gallery.images().len(), 2);
        assert_eq!(gallery.images()[0].title, "A");
        let ids: HashSet<_> = gallery.images().iter().map(|r| &r.id).collect();
        assert_eq!(ids.len(), gallery.images().len());
    }

    #[test]
    fn teardown_freezes_state() {
        let mut gallery = loaded(&["a", "b"]);
        let mut rng = rng();
        gallery.teardown();
        let before = (
            gallery.images().to_vec(),
            gallery.featured_url().map(String::from),
            gallery.featured_id().map(String::from),
        );

        for _ in 0..20 {
            assert_eq!(gallery.on_tick(&mut rng), Effect::None);
        }
        gallery.select_image("fb");
        gallery.remove_image("a");
        assert_eq!(
            gallery.apply_fetch(Ok(vec![record("z")])),
            FetchOutcome::Ignored
        );
        assert_eq!(gallery.initialize(), Effect::None);

        assert_eq!(gallery.phase(), Phase::Stopped);
        assert!(!gallery.is_ticking());
        assert_eq!(gallery.images(), before.0.as_slice());
        assert_eq!(gallery.featured_url().map(String::from), before.1);
        assert_eq!(gallery.featured_id().map(String::from), before.2);
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut gallery = loaded(&["a"]);
        gallery.teardown();
        gallery.teardown();
        assert_eq!(gallery.phase(), Phase::Stopped);
    }

    #[test]
    fn teardown_while_empty_ignores_late_results() {
        let mut gallery = GalleryController::new();
        let _ = gallery.initialize();
        gallery.teardown();

        assert_eq!(
            gallery.apply_fetch(Ok(vec![record("a")])),
            FetchOutcome::Ignored
        );
        assert!(gallery.images().is_empty());
        assert_eq!(gallery.featured_slot(), FeaturedSlot::Hidden);
    }

    #[test]
    fn actions_trait_forwards_to_operations() {
        fn drive(actions: &mut impl GalleryActions) {
            actions.select_image("fb".to_string());
            actions.remove_image("a");
        }

        let mut gallery = loaded(&["a", "b"]);
        drive(&mut gallery);

        assert_eq!(gallery.featured_url(), Some("fb"));
        assert_eq!(gallery.images(), &[record("b")]);
    }
}
