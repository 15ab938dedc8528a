//! Recipe request types and input validation.
//!
//! A [`RecipeRequest`] is the validated triple submitted by a user: a food
//! name, a calorie ceiling, and a narrator voice. Out-of-range or malformed
//! input is rejected here, before any backend is called.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Input validation failures for a recipe request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The food name was empty or whitespace.
    #[error("Enter what you want to cook.")]
    EmptyFood,

    /// The calorie limit is outside the accepted range.
    #[error(
        "Calorie limit {value} must be between {} and {}.",
        CalorieLimit::MIN,
        CalorieLimit::MAX
    )]
    CaloriesOutOfRange {
        /// The rejected value.
        value: i64,
    },

    /// The calorie limit is not an integer.
    #[error("Calorie limit must be a whole number, got '{0}'.")]
    InvalidCalories(String),

    /// The voice is not one of the supported narrators.
    #[error("Unknown voice '{0}'.")]
    UnknownVoice(String),
}

/// Narrator voices offered for the recipe audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Voice {
    /// Bella
    #[default]
    Bella,
    /// Antoni
    Antoni,
    /// Arnold
    Arnold,
    /// Adam
    Adam,
    /// Domi
    Domi,
    /// Elli
    Elli,
    /// Josh
    Josh,
    /// Rachel
    Rachel,
    /// Sam
    Sam,
}

impl Voice {
    /// All voices, in the order they are offered to the user.
    pub const ALL: [Self; 9] = [
        Self::Bella,
        Self::Antoni,
        Self::Arnold,
        Self::Adam,
        Self::Domi,
        Self::Elli,
        Self::Josh,
        Self::Rachel,
        Self::Sam,
    ];

    /// Display name of the voice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bella => "Bella",
            Self::Antoni => "Antoni",
            Self::Arnold => "Arnold",
            Self::Adam => "Adam",
            Self::Domi => "Domi",
            Self::Elli => "Elli",
            Self::Josh => "Josh",
            Self::Rachel => "Rachel",
            Self::Sam => "Sam",
        }
    }

    /// ElevenLabs premade voice identifier for this voice.
    #[must_use]
    pub const fn voice_id(&self) -> &'static str {
        match self {
            Self::Bella => "EXAVITQu4vr4xnSDxMaL",
            Self::Antoni => "ErXwobaYiN019PkySvjV",
            Self::Arnold => "VR6AewLTigWG4xSOukaG",
            Self::Adam => "pNInz6obpgDQGcFmaJgB",
            Self::Domi => "AZnzlk1XvdvUeBnXmlld",
            Self::Elli => "MF3mGyEYCl7XYWbV9V6O",
            Self::Josh => "TxGEqnHWrfWFTfGW9XjX",
            Self::Rachel => "21m00Tcm4TlvDq8ikWAM",
            Self::Sam => "yoZ06aMxZJJ28mfd3POQ",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Voice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|voice| voice.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ValidationError::UnknownVoice(name.to_owned()))
    }
}

/// Calorie ceiling for a recipe, always within [`CalorieLimit::MIN`]..=[`CalorieLimit::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CalorieLimit(u32);

impl CalorieLimit {
    /// Smallest accepted limit.
    pub const MIN: u32 = 1;
    /// Largest accepted limit.
    pub const MAX: u32 = 3000;
    /// Limit pre-filled in the form.
    pub const DEFAULT: u32 = 200;

    /// Validate a calorie limit.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::CaloriesOutOfRange {
                value: i64::from(value),
            })
        }
    }

    /// Parse a limit from raw user input.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ValidationError::InvalidCalories(trimmed.to_owned()))?;
        u32::try_from(value)
            .map_err(|_| ValidationError::CaloriesOutOfRange { value })
            .and_then(Self::new)
    }

    /// The limit in calories.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for CalorieLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for CalorieLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for CalorieLimit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u32::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// A validated request for one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeRequest {
    food: String,
    calorie_limit: CalorieLimit,
    voice: Voice,
}

impl RecipeRequest {
    /// Build a request from typed values.
    ///
    /// The food name is kept as entered; it is only checked for being non-blank.
    pub fn new(
        food: impl Into<String>,
        calories: u32,
        voice: Voice,
    ) -> Result<Self, ValidationError> {
        let food = food.into();
        if food.trim().is_empty() {
            return Err(ValidationError::EmptyFood);
        }

        Ok(Self {
            food,
            calorie_limit: CalorieLimit::new(calories)?,
            voice,
        })
    }

    /// Build a request from raw form fields.
    pub fn parse(food: &str, calories: &str, voice: &str) -> Result<Self, ValidationError> {
        if food.trim().is_empty() {
            return Err(ValidationError::EmptyFood);
        }

        Ok(Self {
            food: food.to_owned(),
            calorie_limit: CalorieLimit::parse(calories)?,
            voice: voice.parse()?,
        })
    }

    /// The food to cook.
    #[must_use]
    pub fn food(&self) -> &str {
        &self.food
    }

    /// The calorie ceiling.
    #[must_use]
    pub const fn calorie_limit(&self) -> CalorieLimit {
        self.calorie_limit
    }

    /// The narrator voice.
    #[must_use]
    pub const fn voice(&self) -> Voice {
        self.voice
    }
}
