use serde_json::Value;
use std::{fs, path::PathBuf};

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The file '{file}' is not readable."));
    }
    Ok(path)
}

/// # Errors
///
/// Will return `Err` if the value is not a whole number above zero
pub fn check_positive_number(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{value}' must be a whole number above zero.")),
    }
}

/// # Errors
///
/// Will return `Err` if the file is not readable or is not valid json
pub fn check_readable_file_and_json(file: &str) -> Result<Value, String> {
    let path = check_readable_file(file)?;
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("The json file '{file}' is not readable: {e}"))?;
    let json: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("The json file '{file}' is not valid json: {e}"))?;
    validate_json_format(&json)?;
    Ok(json)
}

/// Validate the snapshot file format
/// format we expect is this:
/// [{ "userId": "<uuid>", "initialHandicapIndex": <float|null>,
///    "rounds": [{"id": <int>, "teeId": <int>, "teeTime": "<rfc3339>", "approvalStatus": "approved"}, ...],
///    "tees": [{"id": <int>, "courseRating18": <float>, "slopeRating18": <float>, ...}, ...],
///    "holes": [{"id": <int>, "teeId": <int>, "holeNumber": <int>, "par": <int>, "hcp": <int>, "distance": <int>}, ...],
///    "scores": [{"roundId": <int>, "holeId": <int>, "strokes": <int>}, ...]
/// }]
///
/// Field types are checked again when the snapshots are deserialized; this
/// only catches a file of the wrong shape early with a readable message.
///
/// # Errors
///
/// Will return `Err` if the json is not in the correct format
pub fn validate_json_format(json: &Value) -> Result<(), String> {
    let Some(users) = json.as_array() else {
        return Err("The json file is not in the correct format. Expected an array.".to_string());
    };

    let expected_keys = [
        "userId",
        "initialHandicapIndex",
        "rounds",
        "tees",
        "holes",
        "scores",
    ];
    for element in users {
        let Some(object) = element.as_object() else {
            return Err(
                "The json file is not in the correct format. Expected objects.".to_string(),
            );
        };
        for key in object.keys() {
            if !expected_keys.contains(&key.as_str()) {
                return Err(format!(
                    "The json file is not in the correct format. Expected keys: {expected_keys:?}"
                ));
            }
        }
        if !element["userId"].is_string() {
            return Err(
                "The json key userId is not in the correct format. Expected a string."
                    .to_string(),
            );
        }
        let initial = &element["initialHandicapIndex"];
        if !initial.is_null() && !initial.is_number() {
            return Err(
                "The json key initialHandicapIndex is not in the correct format. Expected a number or null."
                    .to_string(),
            );
        }
        for key in ["rounds", "tees", "holes", "scores"] {
            let list = &element[key];
            if list.is_null() {
                continue;
            }
            let Some(items) = list.as_array() else {
                return Err(format!(
                    "The json key {key} is not in the correct format. Expected an array."
                ));
            };
            if items.iter().any(|item| !item.is_object()) {
                return Err(format!(
                    "The json key {key} is not in the correct format. Expected objects."
                ));
            }
        }
    }

    Ok(())
}
