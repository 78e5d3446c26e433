/// Splits a sequence label of the form `<name>/<start>-<end>` into its base
/// name and residue-number range.
///
/// A label without a well-formed range suffix yields the whole label and the
/// `(0, 0)` sentinel. Decomposition never fails.
pub fn split_label(label: &str) -> (&str, u32, u32) {
    if let Some((name, range)) = label.rsplit_once('/') {
        if let Some((start, end)) = range.split_once('-') {
            if let (Ok(start), Ok(end)) = (start.parse(), end.parse()) {
                return (name, start, end);
            }
        }
    }
    (label, 0, 0)
}
