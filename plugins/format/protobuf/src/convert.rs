use bench_api::{Dataset, Record};

use crate::models::Test;
use crate::models::test::TestInstance;

// ═══════════════════════════════════════════════════════════════
//  Dataset → models::Test
// ═══════════════════════════════════════════════════════════════

/// Field-by-field copy into the schema type.
///
/// Integers are truncated to 32 bits and `frac` is rounded to `f32`,
/// the same way an `as` cast does.
pub fn narrow(dataset: &Dataset) -> Test {
    Test {
        tests: dataset.tests.iter().map(narrow_record).collect(),
    }
}

fn narrow_record(record: &Record) -> TestInstance {
    TestInstance {
        id: record.id as i32,
        frac: record.frac as f32,
        name: record.name.clone(),
        maps: record.maps.iter().map(|(k, v)| (k.clone(), *v as i32)).collect(),
    }
}

// ═══════════════════════════════════════════════════════════════
//  models::Test → Dataset
// ═══════════════════════════════════════════════════════════════

/// Lossless widening back into the generic shape.
pub fn widen(message: &Test) -> Dataset {
    Dataset::new(message.tests.iter().map(widen_record).collect())
}

fn widen_record(instance: &TestInstance) -> Record {
    Record {
        id: i64::from(instance.id),
        frac: f64::from(instance.frac),
        name: instance.name.clone(),
        maps: instance.maps.iter().map(|(k, v)| (k.clone(), i64::from(*v))).collect(),
    }
}
