//! # Corpus Index
//!
//! Lookup tables from identifier and tag to the documents declaring them.
//! A key may map to several documents: uniqueness is only enforced when the
//! checker runs in strict mode.

use std::collections::BTreeMap;

use crate::document::SchemaDocument;

/// Group documents by their `tag`, preserving input order within a group.
/// Documents without a string `tag` are skipped.
pub fn tag_to_schema<'a>(
    documents: impl IntoIterator<Item = &'a SchemaDocument>,
) -> BTreeMap<String, Vec<&'a SchemaDocument>> {
    group_by_key(documents, "tag")
}

/// Group documents by their `id`, preserving input order within a group.
/// Documents without a string `id` are skipped.
pub fn id_to_schema<'a>(
    documents: impl IntoIterator<Item = &'a SchemaDocument>,
) -> BTreeMap<String, Vec<&'a SchemaDocument>> {
    group_by_key(documents, "id")
}

fn group_by_key<'a>(
    documents: impl IntoIterator<Item = &'a SchemaDocument>,
    key: &str,
) -> BTreeMap<String, Vec<&'a SchemaDocument>> {
    let mut result: BTreeMap<String, Vec<&'a SchemaDocument>> = BTreeMap::new();
    for doc in documents {
        if let Some(value) = doc.get_str(key) {
            result.entry(value.to_string()).or_default().push(doc);
        }
    }
    result
}

/// Both lookup tables, built once per run.
#[derive(Debug, Default)]
pub struct CorpusIndex<'a> {
    by_id: BTreeMap<String, Vec<&'a SchemaDocument>>,
    by_tag: BTreeMap<String, Vec<&'a SchemaDocument>>,
}

impl<'a> CorpusIndex<'a> {
    /// Index every document in `documents`.
    pub fn build<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a SchemaDocument>,
        I::IntoIter: Clone,
    {
        let iter = documents.into_iter();
        Self {
            by_id: id_to_schema(iter.clone()),
            by_tag: tag_to_schema(iter),
        }
    }

    /// Documents declaring `id`.
    pub fn owners_of_id(&self, id: &str) -> &[&'a SchemaDocument] {
        self.by_id.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Documents declaring `tag`.
    pub fn owners_of_tag(&self, tag: &str) -> &[&'a SchemaDocument] {
        self.by_tag.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, yaml: &str) -> SchemaDocument {
        SchemaDocument::parse(name, yaml).unwrap()
    }

    fn corpus() -> Vec<SchemaDocument> {
        vec![
            doc(
                "a-1.0.0.yaml",
                "id: http://stsci.edu/schemas/asdf/a-1.0.0\ntag: tag:stsci.edu:asdf/a-1.0.0\n",
            ),
            doc("b-1.0.0.yaml", "id: http://stsci.edu/schemas/asdf/b-1.0.0\n"),
            doc(
                "b-copy-1.0.0.yaml",
                "id: http://stsci.edu/schemas/asdf/b-1.0.0\ntag: tag:stsci.edu:asdf/b-1.0.0\n",
            ),
            doc("anonymous.yaml", "title: no id here\n"),
        ]
    }

    #[test]
    fn id_index_groups_in_discovery_order() {
        let docs = corpus();
        let index = id_to_schema(&docs);
        assert_eq!(index.len(), 2);
        let owners = &index["http://stsci.edu/schemas/asdf/b-1.0.0"];
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[0].file_name(), "b-1.0.0.yaml");
        assert_eq!(owners[1].file_name(), "b-copy-1.0.0.yaml");
    }

    #[test]
    fn tag_index_skips_untagged_documents() {
        let docs = corpus();
        let index = tag_to_schema(&docs);
        assert_eq!(index.len(), 2);
        assert!(index.contains_key("tag:stsci.edu:asdf/a-1.0.0"));
        assert!(index.contains_key("tag:stsci.edu:asdf/b-1.0.0"));
    }

    #[test]
    fn corpus_index_counts_owners() {
        let docs = corpus();
        let index = CorpusIndex::build(&docs);
        assert_eq!(index.owners_of_id("http://stsci.edu/schemas/asdf/b-1.0.0").len(), 2);
        assert_eq!(index.owners_of_id("http://stsci.edu/schemas/asdf/a-1.0.0").len(), 1);
        assert_eq!(index.owners_of_tag("tag:stsci.edu:asdf/b-1.0.0").len(), 1);
    }

    #[test]
    fn unknown_keys_have_no_owners() {
        let docs = corpus();
        let index = CorpusIndex::build(&docs);
        assert!(index.owners_of_id("http://nowhere").is_empty());
        assert!(index.owners_of_tag("tag:nowhere").is_empty());
        assert!(!index.contains_id("http://nowhere"));
        assert!(index.contains_id("http://stsci.edu/schemas/asdf/a-1.0.0"));
    }

    #[test]
    fn empty_corpus_builds_empty_index() {
        let docs: Vec<SchemaDocument> = Vec::new();
        let index = CorpusIndex::build(&docs);
        assert!(!index.contains_id("http://stsci.edu/schemas/asdf/a-1.0.0"));
        assert!(index.owners_of_tag("tag:stsci.edu:asdf/a-1.0.0").is_empty());
    }
}
