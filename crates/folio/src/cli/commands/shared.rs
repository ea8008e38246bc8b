//! Shared helpers for command implementations.

use std::{fs, path::Path, process::ExitCode};

use folio_hits::{
    AuxiliarySynthesizer, DirectoryTexts, Fixture, HitFactory, HitTree, IndexDocument,
    SearchRequest, Services, TreeBuilder,
};
use folio_query::{DEFAULT, ParsedQuery, parse_terms};
use serde::Deserialize;
use tracing::debug;

use crate::cli::{args::BatchArgs, context::CommandContext};

/// A record's search results as read from a batch file.
#[derive(Debug, Deserialize)]
pub struct Batch {
    /// The record the tree is built for.
    pub root: IndexDocument,
    /// The record's child documents, in result order.
    #[serde(default)]
    pub children: Vec<IndexDocument>,
    /// Data the collaborators answer from.
    #[serde(flatten)]
    pub fixture: Fixture,
}

/// Reads and parses a batch file.
pub fn load_batch(path: &Path) -> Result<Batch, ExitCode> {
    let contents = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: failed to read {}: {e}", path.display());
        ExitCode::FAILURE
    })?;
    let batch: Batch = serde_json::from_str(&contents).map_err(|e| {
        eprintln!("error: invalid batch file {}: {e}", path.display());
        ExitCode::FAILURE
    })?;
    debug!(
        path = %path.display(),
        children = batch.children.len(),
        documents = batch.fixture.documents.len(),
        "loaded batch"
    );
    Ok(batch)
}

/// Parses all queries and merges their terms.
///
/// Unprefixed terms go to the catch-all field `DEFAULT` and to full text.
pub fn parse_queries(queries: &[String]) -> Result<ParsedQuery, ExitCode> {
    let mut merged = ParsedQuery::default();
    for query in queries {
        let parsed = parse_terms(query, DEFAULT).map_err(|e| {
            eprintln!("error: invalid query '{query}': {e}");
            ExitCode::FAILURE
        })?;
        for (field, terms) in &parsed.terms {
            merged.terms.insert_field(field.as_str());
            for term in terms {
                merged.terms.insert(field.as_str(), term.as_str());
            }
        }
        merged.proximity_distance = merged.proximity_distance.max(parsed.proximity_distance);
    }
    Ok(merged)
}

/// Builds the search request for a batch command.
///
/// Without queries the request browses: nothing is highlighted.
pub fn search_request(ctx: &CommandContext, args: &BatchArgs) -> Result<SearchRequest, ExitCode> {
    let parsed = parse_queries(&args.queries)?;
    let terms = (!args.queries.is_empty()).then_some(parsed.terms);
    let options = ctx.hit_options();
    let mut request = options.request(terms);
    if let Some(locale) = &args.locale {
        request.locale.clone_from(locale);
    }
    let proximity = parsed.proximity_distance.max(options.proximity_distance);
    Ok(request.with_proximity(proximity))
}

/// Collaborators answering from `fixture`, with transcriptions read from
/// `directory` when one is given.
pub fn services<'a>(fixture: &'a Fixture, directory: Option<&'a DirectoryTexts>) -> Services<'a> {
    let services = fixture.services();
    match directory {
        Some(texts) => Services { texts, ..services },
        None => services,
    }
}

/// How many of the root's child documents a command turns into hits.
#[derive(Debug, Clone, Copy)]
pub enum Window<'a> {
    /// `count` documents after `skip`, plus CMS and alternate-transcription hits.
    Slice {
        /// Documents to skip.
        skip: usize,
        /// Documents to populate.
        count: usize,
        /// Language of the alternate transcription.
        language: Option<&'a str>,
    },
    /// Every child document.
    All,
}

/// Loads the batch named by `args` and builds its hit tree.
pub fn build_tree(
    ctx: &CommandContext,
    args: &BatchArgs,
    window: Window<'_>,
) -> Result<HitTree, ExitCode> {
    let Batch {
        root,
        children,
        fixture,
    } = load_batch(&args.batch)?;
    let request = search_request(ctx, args)?;
    let options = ctx.hit_options();
    let directory = ctx
        .text_root(args.text_dir.as_deref())
        .map(DirectoryTexts::new);

    let factory = HitFactory::new(&options, services(&fixture, directory.as_ref()), &request);
    let builder = TreeBuilder::new(&factory);
    let mut tree = builder.build_root(&root, children);
    let id = tree.root();

    match window {
        Window::Slice {
            skip,
            count,
            language,
        } => {
            let added = builder.populate_children(&mut tree, id, count, skip);
            let synthesizer = AuxiliarySynthesizer::new(&factory);
            let cms = synthesizer.add_cms_page_hits(&mut tree, id);
            let alternate = synthesizer.add_alternate_text_hits(&mut tree, id, language);
            debug!(added, cms, alternate, "built hit tree");
        }
        Window::All => {
            let added = builder.populate_all(&mut tree, id);
            debug!(added, "built full hit tree");
        }
    }
    Ok(tree)
}
