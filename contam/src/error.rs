/*
MIT License
Copyright (c)  Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use thiserror::Error;

/// The result of the operations in this crate
pub type Result<T> = std::result::Result<T, TranslationError>;

/// Everything that can go wrong when building an airflow network
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The template project is not usable
    #[error("Unable to load templates: {0}")]
    Template(String),

    /// One of the airflow elements of the airtightness level is missing
    #[error("Application of airtightness level failed: {0}")]
    Airtightness(String),

    /// The custom exterior flow rate could not be applied
    #[error("Application of exterior flow rate failed: {0}")]
    ExteriorFlowRate(String),

    /// A story lacks the data needed to become a level
    #[error("Story '{story}' has no {field}, translation aborted")]
    MissingStoryData {
        /// The name of the story
        story: String,
        /// What is missing
        field: &'static str,
    },

    /// There are no stories in the model
    #[error("Failed to find building stories in model, translation aborted")]
    NoLevels,

    /// None of the spaces of a zone is in a story
    #[error("Unable to set level for zone '{0}', translation aborted")]
    ZoneWithoutLevel(String),

    /// A continuous values file was requested but no series were collected
    #[error("There are no time series to write into a continuous values file")]
    NoTimeSeries,

    /// Reading or writing files
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Reading or writing JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TranslationError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<json5::Error> for TranslationError {
    fn from(e: json5::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
