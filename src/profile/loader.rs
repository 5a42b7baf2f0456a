//! CSV loader for batch application files
//!
//! Reads application requests from CSV with the same field names and
//! spelling aliases as the JSON intake format.

use std::fs::File;
use std::path::Path;

use crate::error::EngineError;
use crate::profile::ApplicationRequest;

/// Default path to the bundled sample applications file
pub const DEFAULT_SAMPLE_PATH: &str = "data/applications_sample.csv";

/// Load application requests from a CSV file
pub fn load_applications(path: &Path) -> Result<Vec<ApplicationRequest>, EngineError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut requests = Vec::new();
    for result in reader.deserialize() {
        let request: ApplicationRequest = result?;
        requests.push(request);
    }

    Ok(requests)
}

/// Load the bundled sample applications
pub fn load_sample_applications() -> Result<Vec<ApplicationRequest>, EngineError> {
    load_applications(Path::new(DEFAULT_SAMPLE_PATH))
}
