use super::*;

#[test]
fn chunk_review_href_encodes_the_file_name() {
    assert_eq!(chunk_review_href("chunk_3.csv"), "/analysis/chunk_3.csv");
    assert_eq!(chunk_review_href("batch 1/a.csv"), "/analysis/batch%201%2Fa.csv");
}

#[test]
fn status_class_adds_a_slugged_modifier() {
    assert_eq!(status_class("In Progress"), "chunk-card__status chunk-card__status--in-progress");
    assert_eq!(status_class("  "), "chunk-card__status");
}
