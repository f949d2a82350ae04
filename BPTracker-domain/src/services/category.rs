use crate::entities::reading::Category;

/// Categorize blood pressure based on measurements.
///
/// The clinical bands overlap at their edges, so the checks run as an
/// ordered decision list and the first match wins: Crisis is checked before
/// Stage 2, Stage 2 before Stage 1, then Elevated, then Normal. A pair like
/// (110, 85) therefore resolves to Stage 1 even though its systolic value
/// alone would be Normal. With unsigned integer inputs the bands cover every
/// combination, so the final `Unknown` arm is unreachable in practice.
pub fn categorize(systolic: u16, diastolic: u16) -> Category {
    if systolic > 180 || diastolic > 120 {
        Category::Crisis
    } else if systolic >= 140 || diastolic >= 90 {
        Category::Stage2
    } else if (130..=139).contains(&systolic) || (80..=89).contains(&diastolic) {
        Category::Stage1
    } else if (120..=129).contains(&systolic) && diastolic < 80 {
        Category::Elevated
    } else if systolic < 120 && diastolic < 80 {
        Category::Normal
    } else {
        Category::Unknown
    }
}
