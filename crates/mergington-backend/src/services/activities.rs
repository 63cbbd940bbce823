use async_trait::async_trait;
use dashmap::DashMap;

use mergington::data::{Activity, ActivityDirectory, SignupResult};
use mergington::errors::ActivityError;
use mergington::log;

/// A trait for listing activities and managing their participants.
///
/// The set of activities is fixed when the service is built; only the
/// participant rosters change. Implementations must make the membership
/// check and the roster update of [`enroll`](Self::enroll) and
/// [`unenroll`](Self::unenroll) atomic per activity, so two concurrent
/// sign-ups of the same email can never both succeed.
///
/// # Examples
///
/// ```rust,ignore
/// async fn example_usage<S: ActivityService>(service: &S) -> Result<(), S::Error> {
///     let result = service.enroll("Chess Club ♟️", "newstudent@mergington.edu").await?;
///     println!("{}", result.message);
///
///     let directory = service.list_activities().await?;
///     println!("{} activities", directory.iter().count());
///
///     service.unenroll("Chess Club ♟️", "newstudent@mergington.edu").await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ActivityService {
    /// The error type returned by operations on this service.
    type Error;

    /// Returns every activity with its current roster.
    ///
    /// Activities are returned in the order they were seeded.
    async fn list_activities(&self) -> Result<ActivityDirectory, Self::Error>;

    /// Signs `email` up for the named activity.
    ///
    /// The email is appended to the end of the roster. Neither its syntax nor
    /// the activity's `max_participants` is checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the activity doesn't exist or the email is already
    /// on its roster. The roster is left untouched in both cases.
    async fn enroll(&self, activity_name: &str, email: &str) -> Result<SignupResult, Self::Error>;

    /// Removes `email` from the named activity.
    ///
    /// # Errors
    ///
    /// Returns an error if the activity doesn't exist or the email is not on
    /// its roster.
    async fn unenroll(&self, activity_name: &str, email: &str)
    -> Result<SignupResult, Self::Error>;

    /// Number of activities offered.
    async fn activity_count(&self) -> usize;

    /// Total number of sign-ups across all activities.
    async fn participant_count(&self) -> usize;
}

/// An in-memory implementation of the `ActivityService` trait.
///
/// Rosters live in a `DashMap` keyed by activity name. `enroll` and `unenroll`
/// hold the entry's write guard across the membership check and the update,
/// which serializes changes to one activity without blocking the others.
pub struct ActivityServiceInMemory {
    activities: DashMap<String, Activity>,
    order: Vec<String>,
}

impl ActivityServiceInMemory {
    /// Builds a service offering exactly the given activities, in the given order.
    ///
    /// A repeated name keeps its first position and its last record.
    pub fn new(seed: Vec<(String, Activity)>) -> Self {
        let activities = DashMap::with_capacity(seed.len());
        let mut order = Vec::with_capacity(seed.len());

        for (name, activity) in seed {
            if activities.insert(name.clone(), activity).is_none() {
                order.push(name);
            }
        }

        Self { activities, order }
    }

    /// Builds a service offering the standard Mergington activities.
    pub fn seeded() -> Self {
        Self::new(mergington::data::seed_activities())
    }
}

#[async_trait]
impl ActivityService for ActivityServiceInMemory {
    type Error = ActivityError;

    async fn list_activities(&self) -> Result<ActivityDirectory, Self::Error> {
        let entries = self
            .order
            .iter()
            .filter_map(|name| {
                self.activities
                    .get(name)
                    .map(|entry| (name.clone(), entry.value().clone()))
            })
            .collect();

        Ok(ActivityDirectory::new(entries))
    }

    async fn enroll(&self, activity_name: &str, email: &str) -> Result<SignupResult, Self::Error> {
        let mut activity = self
            .activities
            .get_mut(activity_name)
            .ok_or(ActivityError::ActivityNotFound)?;

        if !activity.add_participant(email) {
            return Err(ActivityError::AlreadySignedUp {
                activity: activity_name.to_string(),
                email: email.to_string(),
            });
        }

        log::info!(activity = activity_name, email, "Participant signed up");
        Ok(SignupResult::signed_up(email, activity_name))
    }

    async fn unenroll(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<SignupResult, Self::Error> {
        let mut activity = self
            .activities
            .get_mut(activity_name)
            .ok_or(ActivityError::ActivityNotFound)?;

        if !activity.remove_participant(email) {
            return Err(ActivityError::NotSignedUp {
                activity: activity_name.to_string(),
                email: email.to_string(),
            });
        }

        log::info!(activity = activity_name, email, "Participant removed");
        Ok(SignupResult::removed(email, activity_name))
    }

    async fn activity_count(&self) -> usize {
        self.activities.len()
    }

    async fn participant_count(&self) -> usize {
        self.activities
            .iter()
            .map(|entry| entry.value().participants.len())
            .sum()
    }
}
