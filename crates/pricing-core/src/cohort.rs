//! Cohort grouping shared by the outlier detector and the group imputer.
//!
//! A cohort is the set of rows sharing identical values for a fixed
//! attribute tuple. Levels are ordered coarse to fine; the finer levels
//! are strict refinements of the coarser ones, so every row belongs to
//! exactly one cohort at each level.

use std::collections::HashMap;

use crate::{Dataset, Value};

/// Granularity of a cohort partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohortLevel {
    Brand,
    BrandModel,
    BrandModelYear,
}

impl CohortLevel {
    /// Grouping attributes for this level, coarse-to-fine order.
    pub fn key_columns(&self) -> &'static [&'static str] {
        match self {
            CohortLevel::Brand => &["brand"],
            CohortLevel::BrandModel => &["brand", "model"],
            CohortLevel::BrandModelYear => &["brand", "model", "registration_year"],
        }
    }
}

/// Grouping key: one canonical token per key column. Rows missing a key
/// attribute land in a sentinel bucket so the partition stays total.
pub type CohortKey = Vec<String>;

/// Partition every row of the dataset into cohorts at the given level.
/// Key columns that are absent from the dataset contribute the missing
/// sentinel for every row, collapsing that attribute.
pub fn group_rows(dataset: &Dataset, level: CohortLevel) -> HashMap<CohortKey, Vec<usize>> {
    let key_columns: Vec<Option<&crate::Column>> = level
        .key_columns()
        .iter()
        .map(|name| dataset.column(name))
        .collect();

    let mut groups: HashMap<CohortKey, Vec<usize>> = HashMap::new();
    for row in 0..dataset.n_rows() {
        let key: CohortKey = key_columns
            .iter()
            .map(|col| match col {
                Some(c) => c.values[row].key_token(),
                None => Value::Missing.key_token(),
            })
            .collect();
        groups.entry(key).or_default().push(row);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Column;

    fn cars() -> Dataset {
        Dataset::new(
            (0..5).map(|i| i.to_string()).collect(),
            vec![
                Column::new(
                    "brand",
                    vec![
                        Value::Cat("opel".into()),
                        Value::Cat("opel".into()),
                        Value::Cat("opel".into()),
                        Value::Cat("fiat".into()),
                        Value::Missing,
                    ],
                ),
                Column::new(
                    "model",
                    vec![
                        Value::Cat("corsa".into()),
                        Value::Cat("corsa".into()),
                        Value::Cat("astra".into()),
                        Value::Cat("panda".into()),
                        Value::Missing,
                    ],
                ),
                Column::new(
                    "registration_year",
                    vec![
                        Value::Num(2015.0),
                        Value::Num(2016.0),
                        Value::Num(2015.0),
                        Value::Num(2015.0),
                        Value::Missing,
                    ],
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_partition_is_total() {
        let ds = cars();
        for level in [
            CohortLevel::Brand,
            CohortLevel::BrandModel,
            CohortLevel::BrandModelYear,
        ] {
            let groups = group_rows(&ds, level);
            let covered: usize = groups.values().map(|rows| rows.len()).sum();
            assert_eq!(covered, ds.n_rows());
        }
    }

    #[test]
    fn test_finer_levels_refine_coarser() {
        let ds = cars();
        let by_brand = group_rows(&ds, CohortLevel::Brand);
        let by_brand_model = group_rows(&ds, CohortLevel::BrandModel);

        // every (brand, model) cohort must sit inside a single brand cohort
        for (key, rows) in &by_brand_model {
            let brand_rows = &by_brand[&vec![key[0].clone()]];
            assert!(rows.iter().all(|r| brand_rows.contains(r)));
        }
    }

    #[test]
    fn test_missing_keys_form_own_bucket() {
        let ds = cars();
        let groups = group_rows(&ds, CohortLevel::Brand);
        let sentinel = vec![Value::Missing.key_token()];
        assert_eq!(groups[&sentinel], vec![4]);
    }
}
