//! Errors for this library

/// All the known errors returned by this crate.
#[derive(Debug, snafu::Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum StarfieldError {
    /// The canvas must have a finite, positive width and height.
    #[snafu(display("Invalid canvas dimensions: {width}x{height}"))]
    InvalidCanvas {
        /// The requested width
        width: f32,
        /// The requested height
        height: f32,
    },

    /// A simulation setting is out of its allowed range.
    #[snafu(display("Invalid simulation config `{field}`: {reason}"))]
    InvalidConfig {
        /// The name of the offending setting
        field: String,
        /// What's wrong with it
        reason: String,
    },
}
