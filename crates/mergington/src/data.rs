//! Data structures exchanged between the Mergington backend and its clients.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An extracurricular activity and its roster.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    /// Capacity hint shown to students. Sign-ups are not limited by it.
    pub max_participants: u32,
    /// Participant emails in sign-up order.
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
        participants: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: participants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Appends `email` to the roster. Returns `false` if it was already present.
    pub fn add_participant(&mut self, email: impl Into<String>) -> bool {
        let email = email.into();
        if self.has_participant(&email) {
            return false;
        }
        self.participants.push(email);
        true
    }

    /// Removes `email` from the roster. Returns `false` if it was not present.
    pub fn remove_participant(&mut self, email: &str) -> bool {
        match self.participants.iter().position(|p| p == email) {
            Some(index) => {
                self.participants.remove(index);
                true
            }
            None => false,
        }
    }
}

/// A snapshot of every activity keyed by name.
///
/// Serialized as a JSON object whose keys keep the order of the entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDirectory(Vec<(String, Activity)>);

impl ActivityDirectory {
    pub fn new(entries: Vec<(String, Activity)>) -> Self {
        Self(entries)
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.0
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, activity)| activity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.0.iter().map(|(name, activity)| (name.as_str(), activity))
    }
}

impl Serialize for ActivityDirectory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, activity) in &self.0 {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ActivityDirectory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DirectoryVisitor;

        impl<'de> Visitor<'de> for DirectoryVisitor {
            type Value = ActivityDirectory;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity names to activities")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, activity)) = access.next_entry::<String, Activity>()? {
                    entries.push((name, activity));
                }
                Ok(ActivityDirectory(entries))
            }
        }

        deserializer.deserialize_map(DirectoryVisitor)
    }
}

/// Body returned when a sign-up or removal succeeds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SignupResult {
    pub message: String,
}

impl SignupResult {
    pub fn signed_up(email: &str, activity: &str) -> Self {
        Self {
            message: format!("Signed up {email} for {activity}"),
        }
    }

    pub fn removed(email: &str, activity: &str) -> Self {
        Self {
            message: format!("Removed {email} from {activity}"),
        }
    }
}

/// Body returned for every rejected request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UptimeInfo {
    pub seconds: i64,
    pub human: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServiceInfo {
    pub activities: String,
    pub activity_count: usize,
    pub participant_count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub started_at: String,
    pub uptime: UptimeInfo,
    pub services: ServiceInfo,
}

/// The activities offered when the service starts, in display order.
pub fn seed_activities() -> Vec<(String, Activity)> {
    let seed = [
        (
            "Chess Club ♟️",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
            ["michael@mergington.edu", "daniel@mergington.edu"],
        ),
        (
            "Programming Class 💻",
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
            ["emma@mergington.edu", "sophia@mergington.edu"],
        ),
        (
            "Gym Class 🏋️",
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
            ["john@mergington.edu", "olivia@mergington.edu"],
        ),
        (
            "Soccer Club ⚽",
            "Team drills, scrimmages, and friendly matches",
            "Mondays and Wednesdays, 3:30 PM - 5:00 PM",
            22,
            ["liam@mergington.edu", "noah@mergington.edu"],
        ),
        (
            "Basketball Club 🏀",
            "Skill development, teamwork, and after-school games",
            "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
            15,
            ["ava@mergington.edu", "mia@mergington.edu"],
        ),
        (
            "Painting Workshop 🎨",
            "Explore watercolor, acrylic, and mixed media techniques",
            "Wednesdays, 3:30 PM - 5:00 PM",
            16,
            ["isabella@mergington.edu", "charlotte@mergington.edu"],
        ),
        (
            "Drama Club 🎭",
            "Acting exercises, improv, and school play preparation",
            "Fridays, 3:30 PM - 5:30 PM",
            18,
            ["amelia@mergington.edu", "harper@mergington.edu"],
        ),
        (
            "Robotics Club 🤖",
            "Design, build, and program robots for competitions",
            "Mondays, 3:30 PM - 5:00 PM",
            14,
            ["ethan@mergington.edu", "james@mergington.edu"],
        ),
        (
            "Math Olympiad Prep 🧮",
            "Practice advanced problem-solving for math contests",
            "Thursdays, 3:30 PM - 5:00 PM",
            12,
            ["lucas@mergington.edu", "alexander@mergington.edu"],
        ),
    ];

    seed.into_iter()
        .map(|(name, description, schedule, max, participants)| {
            (
                name.to_string(),
                Activity::new(description, schedule, max, participants),
            )
        })
        .collect()
}
