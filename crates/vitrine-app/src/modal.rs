//! Detail modal controller and carousel
//!
//! The modal moves through `Closed -> Open -> Closing -> Closed`. Closing is
//! animated: `close()` starts an exit transition identified by a generation
//! number and the caller schedules `ModalCloseFinished { generation }` for
//! when it ends. Only the latest generation completes; restarting the close
//! or reopening the modal makes older completions stale.
//!
//! At most one [`Carousel`] is alive. It is destroyed before a new one is
//! built and when a close completes.

use std::time::{Duration, Instant};

use vitrine_core::{AssetBase, Product};

/// Buy action target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuyLink {
    Url(String),
    /// No link: the action does nothing
    Disabled,
}

/// Text content of the open modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalDetail {
    pub product_index: usize,
    pub title: String,
    pub description: String,
    /// Material first, then styles
    pub tags: Vec<String>,
    pub buy_link: BuyLink,
}

/// One carousel slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub image_url: String,
    pub alt: String,
}

/// Looping image carousel bound to one product
#[derive(Debug, PartialEq, Eq)]
pub struct Carousel {
    id: u64,
    slides: Vec<Slide>,
    index: usize,
}

impl Carousel {
    fn new(id: u64, slides: Vec<Slide>) -> Self {
        Self {
            id,
            slides,
            index: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn next(&mut self) {
        if !self.slides.is_empty() {
            self.index = (self.index + 1) % self.slides.len();
        }
    }

    pub fn previous(&mut self) {
        let len = self.slides.len();
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    pub fn go_to(&mut self, index: usize) {
        if index < self.slides.len() {
            self.index = index;
        }
    }
}

/// Modal lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Open,
    /// Exit transition running
    Closing { generation: u64 },
}

/// Which transition is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Enter,
    Exit,
}

/// Transient style override applied while a transition runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub started: Instant,
    pub duration: Duration,
}

impl Transition {
    /// Progress in `0.0..=1.0`
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Rows the modal is pushed down by at `now` (enter slides up into
    /// place, exit slides down out of it)
    pub fn offset_rows(&self, now: Instant, max_rows: u16) -> u16 {
        let progress = self.progress(now);
        let factor = match self.kind {
            TransitionKind::Enter => 1.0 - progress,
            TransitionKind::Exit => progress,
        };
        (factor * f32::from(max_rows)).round() as u16
    }
}

/// What a completed close actually changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloseEffects {
    pub hid_modal: bool,
    pub restored_scroll: bool,
    pub destroyed_carousel: bool,
}

impl CloseEffects {
    pub fn is_empty(&self) -> bool {
        !self.hid_modal && !self.restored_scroll && !self.destroyed_carousel
    }
}

/// Input to the modal controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    Close,
    CloseFinished { generation: u64 },
    NextSlide,
    PreviousSlide,
    GoToSlide(usize),
}

/// Detail modal state
#[derive(Debug, Default)]
pub struct ModalController {
    phase: ModalPhase,
    detail: Option<ModalDetail>,
    carousel: Option<Carousel>,
    visible: bool,
    scroll_locked: bool,
    transition: Option<Transition>,
    close_generation: u64,
    next_carousel_id: u64,
    carousels_created: u64,
    carousels_destroyed: u64,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate and show the modal for `product`.
    ///
    /// A live carousel from a previous open is destroyed first. An
    /// in-flight close is cancelled: its completion becomes stale.
    pub fn open(
        &mut self,
        product_index: usize,
        product: &Product,
        assets: &AssetBase,
        now: Instant,
        transition: Duration,
    ) {
        if matches!(self.phase, ModalPhase::Closing { .. }) {
            self.close_generation += 1;
        }

        self.detail = Some(ModalDetail {
            product_index,
            title: product.name.clone(),
            description: product.description_text().to_string(),
            tags: product.detail_tags().into_iter().map(str::to_string).collect(),
            buy_link: product
                .buy_link()
                .map(|url| BuyLink::Url(url.to_string()))
                .unwrap_or(BuyLink::Disabled),
        });

        let slides = assets
            .slide_images(product)
            .into_iter()
            .map(|image_url| Slide {
                image_url,
                alt: product.name.clone(),
            })
            .collect();
        self.destroy_carousel();
        self.carousel = Some(Carousel::new(self.next_carousel_id, slides));
        self.next_carousel_id += 1;
        self.carousels_created += 1;

        self.visible = true;
        self.scroll_locked = true;
        self.phase = ModalPhase::Open;
        self.transition = Some(Transition {
            kind: TransitionKind::Enter,
            started: now,
            duration: transition,
        });
    }

    /// Start (or restart) the exit transition.
    ///
    /// Returns the generation the completion must carry.
    pub fn close(&mut self, now: Instant, transition: Duration) -> u64 {
        self.close_generation += 1;
        self.phase = ModalPhase::Closing {
            generation: self.close_generation,
        };
        self.transition = Some(Transition {
            kind: TransitionKind::Exit,
            started: now,
            duration: transition,
        });
        self.close_generation
    }

    /// Finish the exit transition for `generation`.
    ///
    /// Stale generations change nothing. Each effect is applied at most once,
    /// so a second close completing after the first reports no effects.
    pub fn finish_close(&mut self, generation: u64) -> CloseEffects {
        if self.phase != (ModalPhase::Closing { generation }) {
            return CloseEffects::default();
        }

        let mut effects = CloseEffects::default();
        if self.visible {
            self.visible = false;
            effects.hid_modal = true;
        }
        if self.scroll_locked {
            self.scroll_locked = false;
            effects.restored_scroll = true;
        }
        effects.destroyed_carousel = self.destroy_carousel();

        self.transition = None;
        self.phase = ModalPhase::Closed;
        effects
    }

    /// Clear a finished enter transition
    pub fn tick(&mut self, now: Instant) {
        if let Some(transition) = self.transition {
            if transition.kind == TransitionKind::Enter && transition.progress(now) >= 1.0 {
                self.transition = None;
            }
        }
    }

    /// Apply a non-open event. `Close` returns the generation to schedule
    /// completion for.
    pub fn handle(&mut self, event: ModalEvent, now: Instant, transition: Duration) -> Option<u64> {
        match event {
            ModalEvent::Close => return Some(self.close(now, transition)),
            ModalEvent::CloseFinished { generation } => {
                self.finish_close(generation);
            }
            ModalEvent::NextSlide => {
                if let Some(carousel) = self.carousel_mut() {
                    carousel.next();
                }
            }
            ModalEvent::PreviousSlide => {
                if let Some(carousel) = self.carousel_mut() {
                    carousel.previous();
                }
            }
            ModalEvent::GoToSlide(index) => {
                if let Some(carousel) = self.carousel_mut() {
                    carousel.go_to(index);
                }
            }
        }
        None
    }

    /// Drop everything immediately, without a transition (shutdown)
    pub fn teardown(&mut self) {
        self.destroy_carousel();
        self.close_generation += 1;
        self.visible = false;
        self.scroll_locked = false;
        self.transition = None;
        self.detail = None;
        self.phase = ModalPhase::Closed;
    }

    fn destroy_carousel(&mut self) -> bool {
        if self.carousel.take().is_some() {
            self.carousels_destroyed += 1;
            true
        } else {
            false
        }
    }

    /// Carousel, only while the modal is interactive
    fn carousel_mut(&mut self) -> Option<&mut Carousel> {
        if self.phase == ModalPhase::Open {
            self.carousel.as_mut()
        } else {
            None
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == ModalPhase::Open
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Page scrolling is suspended while this is set
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn detail(&self) -> Option<&ModalDetail> {
        self.detail.as_ref()
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Carousels created minus carousels destroyed
    pub fn live_carousels(&self) -> u64 {
        self.carousels_created - self.carousels_destroyed
    }
}
