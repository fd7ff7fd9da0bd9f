//! Founder module - the sourced, typed profile of a person.
//!
//! A profile is assembled from independently extracted facets:
//!
//! - **Basic info** - name, domains, financial background, era
//! - **Timeline** - dated milestones, merged across transcript chunks
//! - **Character** - traits, beliefs, philosophies, habits, unique approaches
//! - **History** - failures, key decisions, connections, anecdotes
//! - **Emotional intelligence** - stress management and leadership style
//!
//! # Domain Invariants
//!
//! 1. Every sourced record carries a quote (possibly empty), a confidence and
//!    a data type
//! 2. Timeline events are duplicates only when every field matches
//! 3. The aggregate is built once and never mutated afterwards

mod basic_info;
mod character;
mod emotional;
mod facet;
mod history;
mod profile;
mod timeline;
mod transcript;

pub use basic_info::{BasicInfo, Era};
pub use character::{
    Belief, BlindSpot, Contradiction, Example, Habit, Philosophy, Quote, Trait, TraitCategory,
    TraitEvolution, TraitOrigin, UniqueApproach,
};
pub use emotional::{EmotionalIntelligence, LeadershipTrait, StressStrategy};
pub use facet::{Facet, ResponseShape};
pub use history::{Anecdote, Connection, Failure, KeyDecision};
pub use profile::{FacetRecords, Founder, Metadata, PROFILE_VERSION, TRANSCRIPT_SOURCE};
pub use timeline::{merge_timeline, EventType, TimelineEvent, TraitChange};
pub use transcript::{Transcript, PARAGRAPH_SEPARATOR};
