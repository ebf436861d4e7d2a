use crate::core::{AxisDependency, CandleDataSet};
use crate::error::{ChartError, ChartResult};

/// Ordered collection of candle data sets owned by a chart.
#[derive(Debug, Clone, Default)]
pub struct CandleData {
    data_sets: Vec<CandleDataSet>,
}

impl CandleData {
    #[must_use]
    pub fn new(data_sets: Vec<CandleDataSet>) -> Self {
        Self { data_sets }
    }

    pub fn add_data_set(&mut self, data_set: CandleDataSet) {
        self.data_sets.push(data_set);
    }

    pub fn remove_data_set(&mut self, index: usize) -> ChartResult<CandleDataSet> {
        if index >= self.data_sets.len() {
            return Err(ChartError::DataSetIndexOutOfRange {
                index,
                count: self.data_sets.len(),
            });
        }
        Ok(self.data_sets.remove(index))
    }

    #[must_use]
    pub fn data_sets(&self) -> &[CandleDataSet] {
        &self.data_sets
    }

    #[must_use]
    pub fn data_set_count(&self) -> usize {
        self.data_sets.len()
    }

    #[must_use]
    pub fn data_set_by_index(&self, index: usize) -> Option<&CandleDataSet> {
        self.data_sets.get(index)
    }

    pub fn data_set_by_index_mut(&mut self, index: usize) -> Option<&mut CandleDataSet> {
        self.data_sets.get_mut(index)
    }

    #[must_use]
    pub fn data_set_by_label(&self, label: &str, ignore_case: bool) -> Option<&CandleDataSet> {
        self.data_sets.iter().find(|data_set| match data_set.label() {
            Some(candidate) if ignore_case => candidate.eq_ignore_ascii_case(label),
            Some(candidate) => candidate == label,
            None => false,
        })
    }

    /// Total number of entries across all data sets.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data_sets.iter().map(CandleDataSet::entry_count).sum()
    }

    #[must_use]
    pub fn max_entry_count_set(&self) -> Option<&CandleDataSet> {
        self.data_sets.iter().max_by_key(|data_set| data_set.entry_count())
    }

    /// Combined x extent of all non-empty data sets.
    #[must_use]
    pub fn x_range(&self) -> Option<(f64, f64)> {
        merge_ranges(self.data_sets.iter().filter_map(CandleDataSet::x_range))
    }

    /// Combined low/high extent of the data sets plotted against `axis`.
    #[must_use]
    pub fn y_range(&self, axis: AxisDependency) -> Option<(f64, f64)> {
        merge_ranges(
            self.data_sets
                .iter()
                .filter(|data_set| data_set.axis_dependency() == axis)
                .filter_map(CandleDataSet::y_range),
        )
    }
}

fn merge_ranges(ranges: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    ranges.fold(None, |acc, (min, max)| match acc {
        None => Some((min, max)),
        Some((acc_min, acc_max)) => Some((acc_min.min(min), acc_max.max(max))),
    })
}

#[cfg(test)]
mod tests {
    use super::CandleData;
    use crate::core::{AxisDependency, CandleDataSet, CandleEntry};

    fn data_set(label: &str, xs: &[f64], axis: AxisDependency, base: f64) -> CandleDataSet {
        CandleDataSet::new(
            xs.iter()
                .map(|x| CandleEntry::new(*x, base, base + 2.0, base - 2.0, base).expect("entry"))
                .collect(),
            Some(label),
        )
        .with_axis_dependency(axis)
    }

    #[test]
    fn y_extent_is_per_axis() {
        let data = CandleData::new(vec![
            data_set("left", &[0.0, 1.0], AxisDependency::Left, 10.0),
            data_set("right", &[2.0, 5.0], AxisDependency::Right, 100.0),
        ]);
        assert_eq!(data.x_range(), Some((0.0, 5.0)));
        assert_eq!(data.y_range(AxisDependency::Left), Some((8.0, 12.0)));
        assert_eq!(data.y_range(AxisDependency::Right), Some((98.0, 102.0)));
        assert_eq!(data.entry_count(), 4);
    }

    #[test]
    fn lookup_by_label_and_index() {
        let mut data = CandleData::default();
        data.add_data_set(data_set("BTC", &[0.0], AxisDependency::Left, 1.0));
        assert!(data.data_set_by_label("btc", true).is_some());
        assert!(data.data_set_by_label("btc", false).is_none());
        assert!(data.remove_data_set(3).is_err());
        assert!(data.remove_data_set(0).is_ok());
        assert_eq!(data.data_set_count(), 0);
        assert_eq!(data.x_range(), None);
    }
}
