//! Interactive prompts. Each function blocks on user input.

use ds_core::{
    Location, LocationError,
    config::{validate_latitude, validate_longitude},
};
use inquire::{
    Confirm, CustomType, Password, PasswordDisplayMode, Select, Text, required,
    validator::Validation,
};
use std::fmt;

pub fn api_key() -> anyhow::Result<String> {
    let key = Password::new("Dark Sky API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Stored in the settings file, see `ds --settings`")
        .with_validator(required!("An API key is required"))
        .prompt()?;

    Ok(key)
}

/// Ask for a name and coordinates until the user confirms them.
pub fn new_location() -> anyhow::Result<Location> {
    loop {
        let name = Text::new("Location name:")
            .with_validator(required!("A name is required"))
            .prompt()?;

        let latitude = coordinate("Latitude:", validate_latitude)?;
        let longitude = coordinate("Longitude:", validate_longitude)?;

        let location = Location {
            name: name.trim().to_string(),
            latitude,
            longitude,
        };

        if confirm(&format!("Save {location}?"), true)? {
            return Ok(location);
        }
    }
}

fn coordinate(
    message: &str,
    validate: fn(f64) -> Result<(), LocationError>,
) -> anyhow::Result<f64> {
    let value = CustomType::<f64>::new(message)
        .with_error_message("Please type a number, e.g. 41.0415")
        .with_validator(move |value: &f64| {
            Ok(match validate(*value) {
                Ok(()) => Validation::Valid,
                Err(err) => Validation::Invalid(err.to_string().into()),
            })
        })
        .prompt()?;

    Ok(value)
}

pub fn confirm(message: &str, default: bool) -> anyhow::Result<bool> {
    Ok(Confirm::new(message).with_default(default).prompt()?)
}

struct Choice {
    location: Location,
    current: bool,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.current { "*" } else { " " };
        write!(f, "{marker} {}", self.location)
    }
}

/// Let the user choose one of `locations`; the current one is marked.
pub fn pick_location(
    message: &str,
    locations: Vec<Location>,
    current: Option<&str>,
) -> anyhow::Result<Location> {
    if locations.is_empty() {
        return Err(LocationError::NoSavedLocation.into());
    }

    let start = locations
        .iter()
        .position(|l| Some(l.name.as_str()) == current)
        .unwrap_or(0);
    let choices = locations
        .into_iter()
        .map(|location| Choice {
            current: Some(location.name.as_str()) == current,
            location,
        })
        .collect();

    let choice = Select::new(message, choices)
        .with_starting_cursor(start)
        .prompt()?;

    Ok(choice.location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_location_list_is_reported_before_prompting() {
        let err = pick_location("Pick one", Vec::new(), None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LocationError>(),
            Some(&LocationError::NoSavedLocation)
        );
    }

    #[test]
    fn current_choice_is_marked() {
        let location = Location {
            name: "Istanbul".into(),
            latitude: 41.04,
            longitude: 29.0,
        };
        let choice = Choice {
            location,
            current: true,
        };
        assert_eq!(choice.to_string(), "* Istanbul (41.04, 29)");
    }
}
