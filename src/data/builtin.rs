use crate::data::sample::Sample;

/// Small two-class toy set: class 0 when the first feature dominates, class 1
/// when the second does. A bias-free sigmoid network separates it reliably.
pub fn builtin_dominant() -> Vec<Sample> {
    vec![
        Sample::new(vec![1.0, 0.0], 0),
        Sample::new(vec![0.0, 1.0], 1),
        Sample::new(vec![0.9, 0.2], 0),
        Sample::new(vec![0.1, 0.8], 1),
        Sample::new(vec![0.7, 0.1], 0),
        Sample::new(vec![0.2, 0.6], 1),
        Sample::new(vec![0.8, 0.4], 0),
        Sample::new(vec![0.3, 0.9], 1),
    ]
}
