//! Result tables.

use crate::metadata::StructureMetadata;
use crate::networks::{format_network, Comparison, Relationship};
use crate::pipeline::StructureReport;

use polars::prelude::*;
use std::collections::BTreeMap;

/// Receives each analyzed structure.
pub trait ResultSink {
    fn accept(&mut self, report: &StructureReport);
}

#[derive(Debug, Clone)]
struct Row {
    structure: String,
    metadata: StructureMetadata,
    comparison: Comparison,
}

/// Accumulates comparisons as rows of a relationship table.
#[derive(Debug, Clone, Default)]
pub struct TableSink {
    rows: Vec<Row>,
}

impl ResultSink for TableSink {
    fn accept(&mut self, report: &StructureReport) {
        self.rows.extend(report.comparisons.iter().map(|c| Row {
            structure: report.structure.clone(),
            metadata: report.metadata.clone(),
            comparison: c.clone(),
        }));
    }
}

impl TableSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of comparisons per relationship, including empty categories.
    pub fn relationship_counts(&self) -> BTreeMap<Relationship, usize> {
        let mut counts: BTreeMap<Relationship, usize> = Relationship::ALL
            .iter()
            .filter(|r| **r != Relationship::Unknown)
            .map(|r| (*r, 0))
            .collect();
        for row in &self.rows {
            *counts.entry(row.comparison.relationship).or_insert(0) += 1;
        }
        counts
    }

    /// One row per comparison: structure, relationship, bridge, chain, ec, organism.
    pub fn to_df(&self) -> PolarsResult<DataFrame> {
        let rows = &self.rows;
        df!(
            "structure" => rows.iter().map(|r| r.structure.to_owned()).collect::<Vec<String>>(),
            "relationship" => rows.iter().map(|r| r.comparison.relationship.code()).collect::<Vec<&str>>(),
            "bridge" => rows.iter().map(|r| format_network(&r.comparison.bridge)).collect::<Vec<String>>(),
            "chain" => rows.iter().map(|r| format_network(&r.comparison.chain)).collect::<Vec<String>>(),
            "ec" => rows.iter().map(|r| r.metadata.ec.clone()).collect::<Vec<Option<String>>>(),
            "organism" => rows.iter().map(|r| r.metadata.organism.clone()).collect::<Vec<Option<String>>>(),
        )
    }

    /// Relationship counts per top level EC class; unannotated structures are grouped
    /// under a missing class.
    pub fn ec_class_df(&self) -> PolarsResult<DataFrame> {
        let mut counts: BTreeMap<(Option<String>, Relationship), usize> = BTreeMap::new();
        for row in &self.rows {
            let key = (row.metadata.ec_class(), row.comparison.relationship);
            *counts.entry(key).or_insert(0) += 1;
        }
        df!(
            "ec_class" => counts.keys().map(|(ec, _)| ec.clone()).collect::<Vec<Option<String>>>(),
            "relationship" => counts.keys().map(|(_, r)| r.code()).collect::<Vec<&str>>(),
            "count" => counts.values().map(|c| *c as u32).collect::<Vec<u32>>(),
        )
    }

    /// Count and proportion of each relationship across all accepted structures.
    pub fn summary_df(&self) -> PolarsResult<DataFrame> {
        let counts = self.relationship_counts();
        let total: usize = counts.values().sum();
        df!(
            "relationship" => counts.keys().map(|r| r.code()).collect::<Vec<&str>>(),
            "count" => counts.values().map(|c| *c as u32).collect::<Vec<u32>>(),
            "proportion" => counts
                .values()
                .map(|c| if total == 0 { 0.0 } else { *c as f64 / total as f64 })
                .collect::<Vec<f64>>(),
        )
    }
}

/// One row per Met-aromatic interaction.
pub fn interactions_to_df(reports: &[StructureReport]) -> PolarsResult<DataFrame> {
    let rows: Vec<(&StructureReport, _)> = reports
        .iter()
        .flat_map(|r| r.interactions.iter().map(move |i| (r, i)))
        .collect();
    df!(
        "structure" => rows.iter().map(|(r, _)| r.structure.to_owned()).collect::<Vec<String>>(),
        "chain" => rows.iter().map(|(r, _)| r.chain.to_owned()).collect::<Vec<String>>(),
        "aromatic" => rows.iter().map(|(_, i)| i.aromatic.kind.to_string()).collect::<Vec<String>>(),
        "aromatic_resi" => rows.iter().map(|(_, i)| i.aromatic.resi as i64).collect::<Vec<i64>>(),
        "methionine" => rows.iter().map(|(_, i)| i.methionine.kind.to_string()).collect::<Vec<String>>(),
        "methionine_resi" => rows.iter().map(|(_, i)| i.methionine.resi as i64).collect::<Vec<i64>>(),
        "norm" => rows.iter().map(|(_, i)| i.norm).collect::<Vec<f64>>(),
        "met_theta" => rows.iter().map(|(_, i)| i.met_theta).collect::<Vec<f64>>(),
        "met_phi" => rows.iter().map(|(_, i)| i.met_phi).collect::<Vec<f64>>(),
    )
}

/// One row per bridge that passed the partner kind filter.
pub fn bridges_to_df(reports: &[StructureReport]) -> PolarsResult<DataFrame> {
    let rows: Vec<(&StructureReport, _)> = reports
        .iter()
        .flat_map(|r| r.bridges.iter().map(move |b| (r, b)))
        .collect();
    df!(
        "structure" => rows.iter().map(|(r, _)| r.structure.to_owned()).collect::<Vec<String>>(),
        "methionine" => rows.iter().map(|(_, b)| b.methionine.to_string()).collect::<Vec<String>>(),
        "aromatics" => rows.iter().map(|(_, b)| b.to_string()).collect::<Vec<String>>(),
        "order" => rows.iter().map(|(_, b)| b.order() as u32).collect::<Vec<u32>>(),
        "ec" => rows.iter().map(|(r, _)| r.metadata.ec.clone()).collect::<Vec<Option<String>>>(),
    )
}

/// Aromatic-methionine pair counts per number of interactions, summed over structures.
pub fn order_breakdown_to_df(reports: &[StructureReport]) -> PolarsResult<DataFrame> {
    let mut totals: BTreeMap<usize, usize> = BTreeMap::new();
    for report in reports {
        for (order, count) in &report.order_breakdown {
            *totals.entry(*order).or_insert(0) += count;
        }
    }
    df!(
        "order" => totals.keys().map(|k| *k as u32).collect::<Vec<u32>>(),
        "count" => totals.values().map(|v| *v as u32).collect::<Vec<u32>>(),
    )
}

/// Bridge counts by partner kinds, summed over structures.
pub fn compositions_to_df(reports: &[StructureReport]) -> PolarsResult<DataFrame> {
    let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
    for report in reports {
        for (composition, count) in &report.compositions {
            *totals.entry(composition.as_str()).or_insert(0) += count;
        }
    }
    df!(
        "composition" => totals.keys().copied().collect::<Vec<&str>>(),
        "count" => totals.values().map(|v| *v as u32).collect::<Vec<u32>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::Network;
    use crate::structure::{ResidueKind, ResidueLabel};

    fn net(resis: &[isize]) -> Network {
        resis
            .iter()
            .map(|r| ResidueLabel::new(ResidueKind::Tyr, *r))
            .collect()
    }

    fn comparison(relationship: Relationship) -> Comparison {
        Comparison {
            bridge: net(&[2, 3]),
            chain: net(&[1, 2, 3]),
            relationship,
        }
    }

    fn report(
        structure: &str,
        ec: Option<&str>,
        relationships: &[Relationship],
    ) -> StructureReport {
        StructureReport {
            structure: structure.to_string(),
            chain: "A".to_string(),
            metadata: StructureMetadata {
                ec: ec.map(String::from),
                organism: ec.map(|_| "HOMO SAPIENS".to_string()),
            },
            comparisons: relationships.iter().map(|r| comparison(*r)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_table_sink() {
        use Relationship::*;
        let mut sink = TableSink::new();
        assert!(sink.is_empty());
        sink.accept(&report(
            "1abc",
            Some("3.2.1.17"),
            &[DirectSuperimposition, NoRelationship],
        ));
        sink.accept(&report("2xyz", None, &[NoRelationship]));
        sink.accept(&report("3def", Some("1.1.1.1"), &[]));
        assert_eq!(sink.len(), 3);

        let df = sink.to_df().unwrap();
        assert_eq!(df.shape(), (3, 6));
        let bridge = df.column("bridge").unwrap().str().unwrap().get(0);
        assert_eq!(bridge, Some("{TYR2,TYR3}"));
        let structure = df.column("structure").unwrap().str().unwrap().get(2);
        assert_eq!(structure, Some("2xyz"));

        let ec: Vec<Option<&str>> = df.column("ec").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(ec, vec![Some("3.2.1.17"), Some("3.2.1.17"), None]);
        let organism = df.column("organism").unwrap().str().unwrap().get(0);
        assert_eq!(organism, Some("HOMO SAPIENS"));
    }

    #[test]
    fn test_ec_class_counts() {
        use Relationship::*;
        let mut sink = TableSink::new();
        sink.accept(&report("1abc", Some("3.2.1.17"), &[NoRelationship, DirectSuperimposition]));
        sink.accept(&report("2abc", Some("3.4.21.4"), &[NoRelationship]));
        sink.accept(&report("3abc", None, &[NoRelationship]));

        let df = sink.ec_class_df().unwrap();
        let classes: Vec<Option<&str>> = df.column("ec_class").unwrap().str().unwrap().into_iter().collect();
        let codes: Vec<Option<&str>> = df.column("relationship").unwrap().str().unwrap().into_iter().collect();
        let counts: Vec<Option<u32>> = df.column("count").unwrap().u32().unwrap().into_iter().collect();
        assert_eq!(classes, vec![None, Some("3"), Some("3")]);
        assert_eq!(codes, vec![Some("NR"), Some("NR"), Some("DS")]);
        assert_eq!(counts, vec![Some(1), Some(2), Some(1)]);
    }

    #[test]
    fn test_summary() {
        use Relationship::*;
        let mut sink = TableSink::new();
        sink.accept(&report(
            "1abc",
            None,
            &[NoRelationship, NoRelationship, NoRelationship, IndirectSuperimposition],
        ));

        let counts = sink.relationship_counts();
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[&NoRelationship], 3);
        assert_eq!(counts[&Pseudomembership], 0);

        let df = sink.summary_df().unwrap();
        assert_eq!(df.height(), 4);
        let codes: Vec<Option<&str>> = df.column("relationship").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(codes, vec![Some("NR"), Some("PM"), Some("DS"), Some("IS")]);
        let proportions: Vec<Option<f64>> = df.column("proportion").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(proportions, vec![Some(0.75), Some(0.0), Some(0.0), Some(0.25)]);
    }

    #[test]
    fn test_empty_summary() {
        let df = TableSink::new().summary_df().unwrap();
        let proportions: Vec<Option<f64>> = df.column("proportion").unwrap().f64().unwrap().into_iter().collect();
        assert!(proportions.iter().all(|p| *p == Some(0.0)));
    }
}
