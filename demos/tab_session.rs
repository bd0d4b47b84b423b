//! Tab tree walkthrough on in-memory browsing contexts.
//!
//! Demonstrates:
//! - Building a tree and opening nested tabs
//! - Pumping resource events into the tree
//! - Keyboard actions and URL-bar input
//! - History probes and staleness checks
//! - Saving and restoring a session as JSON
//!
//! Usage:
//!   cargo run --example tab_session
//!   cargo run --example tab_session -- --debug
//!   cargo run --example tab_session -- --unprivileged
//!   cargo run --example tab_session -- --session session.json

mod common;

// ============================================================================
// Imports
// ============================================================================

use anyhow::Context;

use browser_tabtree::{
    AddTab, ChromeOptions, KeyChord, MemoryContextFactory, ResourceEvent, Session, TabTree,
    TreeEvent,
};
use common::Args;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    println!("=== Tab session ===\n");

    // ========================================================================
    // Setup
    // ========================================================================

    let mut options = ChromeOptions::new();
    if args.unprivileged {
        options = options.with_unprivileged();
    }
    let factory = MemoryContextFactory::new();

    let mut tree = TabTree::builder()
        .options(options.clone())
        .context_factory(factory.clone())
        .empty()
        .build()?;
    let mut events = tree.subscribe();
    println!("[Setup] Tree ready (platform={:?})\n", options.platform);

    // ========================================================================
    // Open tabs
    // ========================================================================

    println!("[1] Opening tabs...");
    let docs = tree.add_tab(AddTab::new().url("https://docs.rs/"))?;
    let tokio_docs = tree.add_tab(AddTab::new().url("https://docs.rs/tokio").parent(docs))?;
    tree.add_tab(AddTab::new().url("https://docs.rs/serde").parent(docs))?;
    tree.add_tab(AddTab::new().url("https://crates.io/"))?;

    let applied = tree.process_pending_events();
    println!("    {} tabs, {applied} resource events applied", tree.tab_count());
    print!("{tree}");

    // ========================================================================
    // Child tab opened by a page
    // ========================================================================

    println!("\n[2] Page opens a background tab...");
    tree.handle_resource_event(
        tokio_docs,
        ResourceEvent::OpenTab {
            url: "https://tokio.rs/".into(),
            context: None,
        },
    )?;
    tree.process_pending_events();
    print!("{tree}");

    // ========================================================================
    // Keyboard and URL bar
    // ========================================================================

    println!("\n[3] Keyboard actions...");
    for (mods, key) in [("Ctrl", "Tab"), ("Ctrl", "Tab"), ("Ctrl Shift", "Tab")] {
        let chord = KeyChord::parse(mods, key)?;
        let action = tree.handle_key(&chord)?;
        println!("    {chord} -> {action:?} (selected={:?})", tree.selected_tab());
    }

    println!("\n[4] URL bar input...");
    tree.submit_user_input("rust async book")?;
    tree.process_pending_events();
    let selected = tree.selected_tab().context("no selected tab")?;
    println!("    {}", tree.tab(selected)?.url_bar_text());

    // ========================================================================
    // History
    // ========================================================================

    println!("\n[5] History probe...");
    let probe = tree.probe_history(selected)?;
    let state = probe.resolve().await;
    println!(
        "    back={} forward={} current={}",
        state.can_go_back,
        state.can_go_forward,
        tree.is_current(&state)
    );

    // ========================================================================
    // Session
    // ========================================================================

    println!("\n[6] Saving session...");
    let json = tree.save_session().to_json()?;
    if let Some(path) = &args.session {
        std::fs::write(path, &json).with_context(|| format!("writing {path}"))?;
        println!("    written to {path}");
    } else {
        println!("    {json}");
    }

    let layout_changes = std::iter::from_fn(|| events.try_recv().ok())
        .filter(|e| *e == TreeEvent::TreeLayoutChanged)
        .count();
    println!("    layout changes seen: {layout_changes}");
    tree.close();

    println!("\n[7] Restoring session...");
    let restored = TabTree::builder()
        .options(options)
        .context_factory(MemoryContextFactory::new())
        .session(Session::from_json(&json)?)
        .build()?;
    print!("{restored}");

    println!("\n=== Done ===");
    Ok(())
}
