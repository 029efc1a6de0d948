use std::path::PathBuf;

use bsbi_index::bsbi::BsbiIndex;
use bsbi_index::codec::CodecKind;
use bsbi_index::idmap::IdMap;
use bsbi_index::index::IndexReader;
use bsbi_index::query::evaluate_query;
use bsbi_index::tokenizer::{EnglishStopWords, IdentityStemmer, WordTokenizer};
use bsbi_index::MAIN_INDEX_NAME;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ixctl", version, about = "Disk-based inverted index: BSBI indexing and Boolean retrieval")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a corpus directory (one sub-directory per block) into an output directory
    Index {
        #[arg(short, long)]
        corpus: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Posting-list codec: raw32, vbyte, simple8b
        #[arg(long, default_value = "vbyte")]
        codec: String,
    },
    /// Evaluate a Boolean query (AND/OR/DIFF, parentheses) against an index
    Query {
        #[arg(short, long)]
        index: PathBuf,
        query: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Index { corpus, output, codec } => {
            let codec_kind = CodecKind::from_name(&codec)
                .ok_or_else(|| format!("unknown codec '{codec}' (expected raw32, vbyte, or simple8b)"))?;

            let mut index = BsbiIndex::new(&corpus, &output, codec_kind);
            let stats = index.start_indexing(&WordTokenizer, &IdentityStemmer, &EnglishStopWords::default())?;

            println!("Indexed {} into {}", corpus.display(), output.display());
            println!("  parsing blocks:   {:.2}s", stats.parsing_blocks.as_secs_f64());
            println!("  writing indices:  {:.2}s", stats.writing_indices.as_secs_f64());
            println!("  merging indices:  {:.2}s", stats.merging_indices.as_secs_f64());
            println!("  total:            {:.2}s", stats.total.as_secs_f64());
        }

        Commands::Query { index, query } => {
            let term_id_map = IdMap::load(index.join("terms.dict"))?;
            let doc_id_map = IdMap::load(index.join("docs.dict"))?;
            let mut reader = IndexReader::open(index.join(MAIN_INDEX_NAME))?;

            let hits = evaluate_query(
                &query,
                &term_id_map,
                &doc_id_map,
                &mut reader,
                &IdentityStemmer,
                &EnglishStopWords::default(),
            )?;

            if hits.is_empty() {
                println!("(no matches)");
            } else {
                for path in hits {
                    println!("{path}");
                }
            }
        }
    }

    Ok(())
}
