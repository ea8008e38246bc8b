use std::collections::BTreeSet;

use folio_highlight::{MARK_CLOSE, MARK_OPEN};
use folio_query::{CMS_TEXT_ALL, DEFAULT, FULLTEXT, SearchTermMap};

use super::*;

fn mark(text: &str) -> String {
    format!("{MARK_OPEN}{text}{MARK_CLOSE}")
}

fn library_terms() -> SearchTermMap {
    let mut terms = SearchTermMap::new();
    terms.insert(DEFAULT, "library");
    terms.insert(FULLTEXT, "library");
    terms
}

fn doc(iddoc: &str, doc_type: &str) -> IndexDocument {
    IndexDocument::new()
        .with(fields::IDDOC, iddoc)
        .with(fields::DOCTYPE, doc_type)
        .with(fields::PI_TOPSTRUCT, "PPN1")
}

fn structure(iddoc: &str, title: &str) -> IndexDocument {
    doc(iddoc, "DOCSTRCT")
        .with(fields::MD_TITLE, title)
        .with(fields::DOCSTRCT, "monograph")
}

fn owned(iddoc: &str, doc_type: &str, owner: &str) -> IndexDocument {
    doc(iddoc, doc_type).with(fields::IDDOC_OWNER, owner)
}

fn subject(iddoc: &str, owner: &str, value: &str) -> IndexDocument {
    owned(iddoc, "METADATA", owner)
        .with(fields::LABEL, "MD_SUBJECT")
        .with("MD_SUBJECT", value)
}

fn page(iddoc: &str, owner: &str, order: &str, filename: &str) -> IndexDocument {
    owned(iddoc, "PAGE", owner)
        .with(fields::ORDER, order)
        .with(fields::FILENAME_FULLTEXT, filename)
}

fn fixture() -> Fixture {
    let mut fixture = Fixture::default();
    fixture.texts.insert(
        "p3.txt".into(),
        "Chapter one. The library was founded in 1850 by the town council. It grew.".into(),
    );
    fixture
}

/// Builds a tree for `root` and `children` and populates all of it.
fn populated(
    fixture: &Fixture,
    request: &SearchRequest,
    root: &IndexDocument,
    children: Vec<IndexDocument>,
) -> (HitTree, usize) {
    let options = HitOptions::default();
    let factory = HitFactory::new(&options, fixture.services(), request);
    let builder = TreeBuilder::new(&factory);
    let mut tree = builder.build_root(root, children);
    let root = tree.root();
    let added = builder.populate_all(&mut tree, root);
    (tree, added)
}

fn assert_counts_match_children(tree: &HitTree) {
    for id in tree.preorder() {
        let hit = tree.hit(id);
        for kind in HitKind::ALL {
            let direct = tree.children(id).filter(|c| c.kind() == Some(kind)).count();
            assert_eq!(hit.count(kind), direct, "count of {kind} on {}", hit.label());
        }
    }
}

fn assert_unique_found_metadata(tree: &HitTree) {
    for id in tree.preorder() {
        let pairs = tree.hit(id).found_metadata();
        let unique: BTreeSet<_> = pairs.iter().map(|p| (&p.label, &p.value)).collect();
        assert_eq!(unique.len(), pairs.len());
    }
}

#[test]
fn record_with_metadata_and_page() {
    let fixture = fixture();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let root = structure("1", "Town history");
    let children = vec![
        root.clone(),
        subject("2", "1", "library science"),
        page("3", "1", "1", "p3.txt"),
    ];

    let (tree, added) = populated(&fixture, &request, &root, children);
    let root_id = tree.root();
    let root_hit = tree.hit(root_id);
    assert_eq!(root_hit.kind(), Some(HitKind::Structure));
    assert_eq!(added, 2);
    assert_eq!(root_hit.populated_count(), 2);
    assert_eq!(root_hit.population_state(), PopulationState::PartiallyPopulated);

    // The owner is the root itself, so both children hang under one wrapper.
    assert_eq!(root_hit.children().len(), 1);
    let wrapper = root_hit.children()[0];
    let wrapper_hit = tree.hit(wrapper);
    assert_eq!(wrapper_hit.label(), "Town history");
    assert_eq!(wrapper_hit.children().len(), 2);
    assert_eq!(wrapper_hit.metadata_count(), 1);
    assert_eq!(wrapper_hit.page_count(), 1);
    assert_eq!(wrapper_hit.hit_type_counts().len(), 2);

    let kinds: Vec<_> = tree.children(wrapper).map(Hit::kind).collect();
    assert_eq!(kinds, [Some(HitKind::GroupedMetadata), Some(HitKind::Page)]);

    let page_hit = tree.children(wrapper).nth(1).unwrap();
    assert!(page_hit.fragment().unwrap().contains(&mark("library")));

    assert_counts_match_children(&tree);
    assert_unique_found_metadata(&tree);
}

#[test]
fn self_owned_metadata_gets_a_wrapper() {
    let fixture = fixture();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let root = structure("1", "Town history");
    let children = vec![
        subject("2", "1", "library science"),
        subject("4", "1", "library law"),
    ];

    let (tree, added) = populated(&fixture, &request, &root, children);
    let root_id = tree.root();
    assert_eq!(added, 2);
    assert_eq!(tree.hit(root_id).children().len(), 1);
    assert_eq!(tree.hit(root_id).metadata_count(), 0);
    assert_eq!(tree.hit(root_id).structure_count(), 1);

    let wrapper = tree.hit(root_id).children()[0];
    assert_ne!(wrapper, root_id);
    assert_eq!(tree.hit(wrapper).metadata_count(), 2);
    assert_eq!(tree.owner_index(root_id).unwrap().hit("1"), Some(wrapper));
    assert_eq!(tree.hit(wrapper).found_metadata().len(), 2);
    assert_counts_match_children(&tree);
}

#[test]
fn page_without_text_is_skipped() {
    let fixture = fixture();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let root = structure("1", "Town history");
    let children = vec![
        structure("10", "Chapter"),
        page("11", "10", "1", "missing.txt"),
        owned("12", "PAGE", "10").with(fields::ORDER, "2"),
    ];

    let (tree, added) = populated(&fixture, &request, &root, children);
    let root_id = tree.root();
    assert_eq!(added, 1);
    assert_eq!(tree.hit(root_id).populated_count(), 1);
    let chapter = tree.hit(root_id).children()[0];
    assert!(!tree.hit(chapter).has_children());
    assert_eq!(tree.hit(chapter).page_count(), 0);
}

#[test]
fn denied_page_is_attached_as_access_denied() {
    let mut fixture = fixture();
    fixture.denied.insert("p3.txt".into());
    let request = SearchRequest::new(Some(library_terms()), "en");
    let root = structure("1", "Town history");
    let children = vec![structure("10", "Chapter"), page("3", "10", "1", "p3.txt")];

    let (tree, added) = populated(&fixture, &request, &root, children);
    assert_eq!(added, 2);
    let chapter = tree.hit(tree.root()).children()[0];
    let denied = tree.children(chapter).next().unwrap();
    assert_eq!(denied.kind(), Some(HitKind::AccessDenied));
    assert!(denied.fragment().is_none());
    assert_eq!(tree.hit(chapter).count(HitKind::AccessDenied), 1);
    assert_eq!(tree.hit(chapter).page_count(), 0);
}

#[test]
fn alto_transcription_is_used_when_plain_text_is_missing() {
    let mut fixture = fixture();
    fixture.texts.insert(
        "p5.xml".into(),
        r#"<alto><TextLine><String CONTENT="Public"/><String CONTENT="library"/></TextLine></alto>"#
            .into(),
    );
    let request = SearchRequest::new(Some(library_terms()), "en");
    let root = structure("1", "Town history");
    let children = vec![
        structure("10", "Chapter"),
        owned("5", "PAGE", "10")
            .with(fields::FILENAME_FULLTEXT, "missing.txt")
            .with(fields::FILENAME_ALTO, "p5.xml"),
    ];

    let (tree, added) = populated(&fixture, &request, &root, children);
    assert_eq!(added, 2);
    let chapter = tree.hit(tree.root()).children()[0];
    let page_hit = tree.children(chapter).next().unwrap();
    assert_eq!(
        page_hit.fragment(),
        Some(format!("Public {}", mark("library")).as_str())
    );
}

#[test]
fn structures_are_root_children_and_owners() {
    let fixture = fixture();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let root = structure("1", "Town history");
    let children = vec![
        structure("10", "Chapter one"),
        structure("20", "Chapter two"),
        subject("21", "20", "library science"),
        page("3", "10", "4", "p3.txt"),
    ];

    let (tree, added) = populated(&fixture, &request, &root, children);
    let root_id = tree.root();
    assert_eq!(added, 4);
    assert_eq!(tree.hit(root_id).structure_count(), 2);
    assert_eq!(tree.hit(root_id).children().len(), 2);

    let labels: Vec<&str> = tree.children(root_id).map(Hit::label).collect();
    assert_eq!(labels, ["Chapter one", "Chapter two"]);
    let [one, two] = [tree.hit(root_id).children()[0], tree.hit(root_id).children()[1]];
    assert_eq!(tree.hit(one).page_count(), 1);
    assert_eq!(tree.hit(two).metadata_count(), 1);
    assert_eq!(tree.hit(one).css_class(), "docstructtype__monograph");

    for id in tree.preorder() {
        if id == root_id {
            continue;
        }
        for child in tree.children(id) {
            assert_ne!(child.kind(), Some(HitKind::Structure));
        }
    }
    assert_counts_match_children(&tree);
}

#[test]
fn missing_owner_is_fetched_lazily() {
    let mut fixture = fixture();
    fixture.documents.push(structure("30", "Appendix"));
    let request = SearchRequest::new(Some(library_terms()), "en");
    let root = structure("1", "Town history");
    let children = vec![page("3", "30", "9", "p3.txt"), subject("31", "30", "library maps")];

    let (tree, added) = populated(&fixture, &request, &root, children);
    let root_id = tree.root();
    assert_eq!(added, 2);
    assert_eq!(tree.hit(root_id).children().len(), 1);
    let appendix = tree.hit(root_id).children()[0];
    assert_eq!(tree.hit(appendix).label(), "Appendix");
    assert_eq!(tree.hit(appendix).page_count(), 1);
    assert_eq!(tree.hit(appendix).metadata_count(), 1);
    assert!(tree.owner_index(root_id).unwrap().document("30").is_some());
}

#[test]
fn unresolvable_and_untyped_documents_are_skipped() {
    let fixture = fixture();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let root = structure("1", "Town history");
    let children = vec![
        subject("40", "999", "library"),
        subject("41", "1", "library"),
        IndexDocument::new().with(fields::IDDOC, "42"),
        doc("43", "SHAPE"),
        doc("44", "GROUP"),
        doc("45", "METADATA").with("MD_SUBJECT", "library without owner"),
    ];

    let (tree, added) = populated(&fixture, &request, &root, children);
    let root_id = tree.root();
    assert_eq!(added, 1);
    assert_eq!(tree.hit(root_id).populated_count(), 1);
    assert!(tree.hit(root_id).has_more_children());
}

#[test]
fn grouped_metadata_repeating_the_owner_is_dropped() {
    let fixture = fixture();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let root = structure("1", "Town history");
    let chapter = structure("10", "Chapter").with("MD_SUBJECT", "library science");
    let children = vec![chapter, subject("11", "10", "library science")];

    let (tree, added) = populated(&fixture, &request, &root, children);
    assert_eq!(added, 1);
    let chapter = tree.hit(tree.root()).children()[0];
    assert!(!tree.hit(chapter).has_children());
    assert_eq!(tree.hit(chapter).metadata_count(), 0);
    assert_eq!(
        tree.hit(chapter).found_metadata(),
        [MetadataPair::new("MD_SUBJECT", format!("{} science", mark("library")))]
    );
}

#[test]
fn child_metadata_propagates_to_owner_except_user_content() {
    let fixture = fixture();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let root = structure("1", "Town history");
    let children = vec![
        structure("10", "Chapter"),
        subject("11", "10", "library law"),
        subject("12", "10", "library statutes"),
        owned("13", "UGC", "10")
            .with(fields::UGCTYPE, "COMMENT")
            .with("MD_TEXT", "visited the library"),
    ];

    let (tree, added) = populated(&fixture, &request, &root, children);
    assert_eq!(added, 4);
    let chapter = tree.hit(tree.root()).children()[0];
    let chapter_hit = tree.hit(chapter);
    assert_eq!(chapter_hit.metadata_count(), 2);
    assert_eq!(chapter_hit.count(HitKind::Comment), 1);
    assert_eq!(
        chapter_hit.found_metadata(),
        [
            MetadataPair::new("MD_SUBJECT", format!("{} law", mark("library"))),
            MetadataPair::new("MD_SUBJECT", format!("{} statutes", mark("library"))),
        ]
    );
    let comment = tree.children(chapter).nth(2).unwrap();
    assert_eq!(comment.found_metadata().len(), 1);
    assert_unique_found_metadata(&tree);
}

#[test]
fn repeated_population_is_idempotent() {
    let fixture = fixture();
    let options = HitOptions::default();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let factory = HitFactory::new(&options, fixture.services(), &request);
    let builder = TreeBuilder::new(&factory);
    let children = vec![
        structure("10", "Chapter"),
        subject("11", "10", "library law"),
        page("3", "10", "1", "p3.txt"),
    ];
    let mut tree = builder.build_root(&structure("1", "Town history"), children);
    let root = tree.root();

    assert_eq!(tree.hit(root).population_state(), PopulationState::Unpopulated);
    assert_eq!(builder.populate_children(&mut tree, root, 2, 0), 2);
    assert_eq!(tree.hit(root).population_state(), PopulationState::PartiallyPopulated);
    let size = tree.len();

    assert_eq!(builder.populate_children(&mut tree, root, 2, 0), 0);
    assert_eq!(tree.len(), size);
    assert_eq!(tree.hit(root).populated_count(), 2);

    assert_eq!(builder.populate_children(&mut tree, root, 5, 1), 1);
    assert_eq!(tree.hit(root).populated_count(), 3);
    assert_eq!(tree.hit(root).population_state(), PopulationState::FullyPopulated);
    assert_counts_match_children(&tree);
}

#[test]
fn population_window_is_clamped() {
    let fixture = fixture();
    let options = HitOptions::default();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let factory = HitFactory::new(&options, fixture.services(), &request);
    let builder = TreeBuilder::new(&factory);
    let mut tree = builder.build_root(
        &structure("1", "Town history"),
        vec![structure("10", "Chapter")],
    );
    let root = tree.root();

    assert_eq!(builder.populate_children(&mut tree, root, 10, 5), 0);
    assert_eq!(builder.populate_children(&mut tree, root, 0, 0), 0);
    assert_eq!(builder.populate_children(&mut tree, root, usize::MAX, 0), 1);
    assert_eq!(tree.hit(root).populated_count(), 1);
    assert!(tree.hit(root).populated_count() <= tree.hit(root).child_documents().len());
}

#[test]
fn documents_without_identifier_attach_once() {
    let fixture = fixture();
    let options = HitOptions::default();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let factory = HitFactory::new(&options, fixture.services(), &request);
    let builder = TreeBuilder::new(&factory);
    let unnamed_page = IndexDocument::new()
        .with(fields::DOCTYPE, "PAGE")
        .with(fields::PI_TOPSTRUCT, "PPN1")
        .with(fields::IDDOC_OWNER, "10")
        .with(fields::ORDER, "1")
        .with(fields::FILENAME_FULLTEXT, "p3.txt");
    let mut tree = builder.build_root(
        &structure("1", "Town history"),
        vec![structure("10", "Chapter"), unnamed_page],
    );
    let root = tree.root();

    assert_eq!(builder.populate_children(&mut tree, root, 2, 0), 2);
    assert_eq!(builder.populate_children(&mut tree, root, 2, 0), 0);
    let chapter = tree.hit(root).children()[0];
    assert_eq!(tree.hit(chapter).page_count(), 1);
    assert_eq!(tree.hit(chapter).children().len(), 1);
    assert_eq!(tree.hit(root).populated_count(), 2);
    assert_counts_match_children(&tree);
}

#[test]
fn structures_without_identifier_are_all_attached() {
    let fixture = fixture();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let unnamed = |title: &str| {
        IndexDocument::new()
            .with(fields::DOCTYPE, "DOCSTRCT")
            .with(fields::MD_TITLE, title)
    };
    let children = vec![structure("10", "Chapter"), unnamed("Plates"), unnamed("Index")];

    let (tree, added) = populated(&fixture, &request, &structure("1", "Town history"), children);
    assert_eq!(added, 3);
    let root = tree.hit(tree.root());
    assert_eq!(root.structure_count(), 3);
    let labels: Vec<&str> = tree.children(tree.root()).map(Hit::label).collect();
    assert_eq!(labels, ["Chapter", "Plates", "Index"]);
}

#[test]
fn proximity_phrases_need_every_word_nearby() {
    let fixture = fixture();
    let mut terms = SearchTermMap::new();
    terms.insert(DEFAULT, "old books");
    let request = SearchRequest::new(Some(terms), "en").with_proximity(3);
    let children = vec![
        structure("10", "Chapter"),
        subject("11", "10", "old maps"),
        subject("12", "10", "old and rare books"),
    ];

    let (tree, added) = populated(&fixture, &request, &structure("1", "Town history"), children);
    assert_eq!(added, 2);
    let chapter = tree.hit(tree.root()).children()[0];
    assert_eq!(tree.hit(chapter).children().len(), 1);
    assert_eq!(
        tree.hit(chapter).found_metadata(),
        [MetadataPair::new(
            "MD_SUBJECT",
            format!("{} and rare {}", mark("old"), mark("books"))
        )]
    );
}

#[test]
fn fuzzy_terms_mark_the_words_they_resolve_to() {
    let fixture = fixture();
    let mut terms = SearchTermMap::new();
    terms.insert(DEFAULT, "wom*n");
    let request = SearchRequest::new(Some(terms), "en");
    let root = structure("1", "Portraits");
    let children = vec![
        structure("10", "Plates"),
        subject("11", "10", "woman with a book"),
    ];

    let (tree, _) = populated(&fixture, &request, &root, children);
    let plates = tree.hit(tree.root()).children()[0];
    let meta = tree.children(plates).next().unwrap();
    assert_eq!(
        meta.found_metadata(),
        [MetadataPair::new("MD_SUBJECT", format!("{} with a book", mark("woman")))]
    );
}

#[test]
fn cms_pages_with_matches_become_hits() {
    let mut fixture = fixture();
    fixture.cms_pages.insert(
        "PPN1".into(),
        vec![
            CmsPage {
                id: "1".into(),
                menu_title: "cms_about".into(),
                url: "/cms/1/".into(),
                texts: vec![
                    "<p>The <b>library</b> is open.</p>".into(),
                    "<p>Another library note.</p>".into(),
                ],
            },
            CmsPage {
                id: "2".into(),
                menu_title: "cms_contact".into(),
                url: "/cms/2/".into(),
                texts: vec!["<p>Write to us.</p>".into()],
            },
        ],
    );
    fixture
        .translations
        .entry("en".into())
        .or_default()
        .insert("cms_about".into(), "About".into());

    let mut terms = library_terms();
    terms.insert(CMS_TEXT_ALL, "library");
    let options = HitOptions::default();
    let request = SearchRequest::new(Some(terms), "en");
    let factory = HitFactory::new(&options, fixture.services(), &request);
    let builder = TreeBuilder::new(&factory);
    let mut tree = builder.build_root(&structure("1", "Town history"), Vec::new());
    let root = tree.root();

    let added = AuxiliarySynthesizer::new(&factory).add_cms_page_hits(&mut tree, root);
    assert_eq!(added, 1);
    assert_eq!(tree.hit(root).cms_page_count(), 1);
    let about = tree.hit(root).children()[0];
    assert_eq!(tree.hit(about).label(), "About");
    assert_eq!(tree.hit(about).url(), "/cms/1/");
    assert_eq!(tree.hit(about).children().len(), 2);
    let fragment = tree.children(about).next().unwrap().fragment().unwrap();
    assert!(fragment.contains(&mark("library")));
    assert!(!fragment.contains("<b>"));
    assert_counts_match_children(&tree);
}

#[test]
fn cms_pages_need_cms_terms() {
    let mut fixture = fixture();
    fixture.cms_pages.insert(
        "PPN1".into(),
        vec![CmsPage {
            texts: vec!["library".into()],
            ..CmsPage::default()
        }],
    );
    let options = HitOptions::default();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let factory = HitFactory::new(&options, fixture.services(), &request);
    let mut tree = TreeBuilder::new(&factory).build_root(&structure("1", "x"), Vec::new());
    let root = tree.root();
    assert_eq!(AuxiliarySynthesizer::new(&factory).add_cms_page_hits(&mut tree, root), 0);
    assert!(!tree.hit(root).has_children());
}

#[test]
fn alternate_transcription_adds_a_page_hit() {
    let mut fixture = fixture();
    fixture.texts.insert(
        "tei_de.xml".into(),
        "<TEI><text><body><p>Die library der Stadt.</p><p>Noch eine library.</p></body></text></TEI>"
            .into(),
    );
    let root_doc = structure("1", "Town history")
        .with("FILENAME_TEI_LANG_DE", "tei_de.xml")
        .with(fields::FILENAME_TEI, "tei.xml");
    let options = HitOptions::default();
    let request = SearchRequest::new(Some(library_terms()), "de");
    let factory = HitFactory::new(&options, fixture.services(), &request);
    let mut tree = TreeBuilder::new(&factory).build_root(&root_doc, Vec::new());
    let root = tree.root();
    let synthesizer = AuxiliarySynthesizer::new(&factory);

    assert!(synthesizer.add_alternate_text_hits(&mut tree, root, Some("de")));
    assert_eq!(tree.hit(root).page_count(), 1);
    let wrapper = tree.hit(root).children()[0];
    assert_eq!(tree.hit(wrapper).label(), "TEI");
    assert!(!tree.hit(wrapper).children().is_empty());
    for fragment in tree.children(wrapper) {
        assert!(fragment.fragment().unwrap().contains(&mark("library")));
    }

    // Without a language the generic file is used, and it cannot be loaded.
    assert!(!synthesizer.add_alternate_text_hits(&mut tree, root, None));
    assert_eq!(tree.hit(root).page_count(), 1);
    assert_counts_match_children(&tree);
}

#[test]
fn alternate_transcription_respects_access() {
    let mut fixture = fixture();
    fixture.texts.insert("tei.xml".into(), "<TEI><text>library</text></TEI>".into());
    fixture.denied.insert("tei.xml".into());
    let root_doc = structure("1", "Town history").with(fields::FILENAME_TEI, "tei.xml");
    let options = HitOptions::default();
    let request = SearchRequest::new(Some(library_terms()), "en");
    let factory = HitFactory::new(&options, fixture.services(), &request);
    let mut tree = TreeBuilder::new(&factory).build_root(&root_doc, Vec::new());
    let root = tree.root();

    assert!(!AuxiliarySynthesizer::new(&factory).add_alternate_text_hits(&mut tree, root, None));
    assert!(!tree.hit(root).has_children());
}

#[test]
fn node_view_and_export_rows() {
    let fixture = fixture();
    let mut options = HitOptions::default();
    options.export_fields = vec![fields::MD_TITLE.into(), fields::ORDER.into()];
    let request = SearchRequest::new(Some(library_terms()), "en");
    let factory = HitFactory::new(&options, fixture.services(), &request);
    let builder = TreeBuilder::new(&factory);
    let children = vec![structure("10", "Chapter"), page("3", "10", "7", "p3.txt")];
    let mut tree = builder.build_root(&structure("1", "Town history"), children);
    let root = tree.root();
    builder.populate_all(&mut tree, root);

    let node = tree.node(root);
    assert_eq!(node.population_state, PopulationState::FullyPopulated);
    assert_eq!(node.children[0].children[0].kind, Some(HitKind::Page));

    let rows = export_rows(&tree);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].fields[fields::MD_TITLE], "Town history");
    assert_eq!(rows[2].fields[fields::ORDER], "7");
    assert_eq!(
        export_columns(&rows, &options.export_fields),
        [fields::MD_TITLE, fields::ORDER]
    );
}
