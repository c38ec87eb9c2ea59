//! G-code Toolpath Viewer
//!
//! A command-line tool for visualizing 3D-printer G-code files as colored
//! 3D toolpaths.
//!
//! Features:
//! - Interactive orbit viewport with one oriented cylinder per extrusion
//! - Per-layer blue-to-red height gradient
//! - Toolpath statistics without opening a window
//! - Top-view PNG preview export
//! - Extraction of slicer-embedded thumbnails

#![forbid(unsafe_code)]

use clap::Parser;
use gcode_viewer::scene::ToolpathScene;
use gcode_viewer::{Document, parse, preview, thumbnail, viewport};
use kiss3d::event::{Action, Key, Modifiers, WindowEvent};
use kiss3d::light::Light;
use kiss3d::window::Window;
use rfd::FileDialog;
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line arguments for the G-code viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the G-code file to view (opens an empty viewer when omitted)
    #[arg(value_name = "FILE")]
    file_path: Option<PathBuf>,

    /// Print a toolpath summary and exit without opening a window
    #[arg(short, long)]
    stats: bool,

    /// Export a top-view preview image and exit
    #[arg(short = 'p', long, value_name = "OUTPUT")]
    export_preview: Option<PathBuf>,

    /// Export the largest slicer-embedded thumbnail and exit
    #[arg(short = 't', long, value_name = "OUTPUT")]
    export_thumbnail: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let offline = args.stats || args.export_preview.is_some() || args.export_thumbnail.is_some();
    if offline {
        let Some(ref path) = args.file_path else {
            return Err("a G-code file is required for --stats and the export options".into());
        };
        let text = fs::read_to_string(path)?;
        let document = parse(&text);

        if args.stats {
            display_stats(path, &document);
        }

        if let Some(ref output) = args.export_preview {
            preview::export_preview(&document, output)?;
            println!("✓ Preview exported to: {}", output.display());
        }

        if let Some(ref output) = args.export_thumbnail {
            match thumbnail::extract(&text) {
                Some(bytes) => {
                    fs::write(output, bytes)?;
                    println!("✓ Thumbnail exported to: {}", output.display());
                }
                None => eprintln!("✗ No embedded thumbnail found"),
            }
        }

        return Ok(());
    }

    run_viewer(args.file_path)
}

/// Display a boxed toolpath summary
fn display_stats(path: &Path, document: &Document) {
    println!("┌─ Toolpath ─────────────────────────────────────────────┐");
    let name = path.display().to_string();
    println!("│ File:                 {:<34} │", truncate_left(&name, 34));
    println!("│ Layers:               {:<34} │", document.layer_count());
    println!("│ Segments:             {:<34} │", document.segment_count());

    if let Some((low, high)) = document.z_range() {
        println!(
            "│ Z range:              {:<34} │",
            format!("{:.2} – {:.2} mm", low, high)
        );
    }
    if let Some((min, max)) = document.bounding_box() {
        println!(
            "│ Bounding box:         {:<34} │",
            format!(
                "{:.1} x {:.1} x {:.1} mm",
                max.x - min.x,
                max.y - min.y,
                max.z - min.z
            )
        );
    }
    println!("└────────────────────────────────────────────────────────┘");

    if document.is_empty() {
        eprintln!("✗ No extrusion moves found — nothing to render");
    }
}

/// Keep the tail of a long name, prefixed with `...`, within `max` bytes.
///
/// The cut lands on a character boundary so non-ASCII paths display safely.
fn truncate_left(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }
    let mut cut = name.len() - (max - 3);
    while !name.is_char_boundary(cut) {
        cut += 1;
    }
    format!("...{}", &name[cut..])
}

/// Viewer state: the loaded document and the primitive set on display
struct ViewerState {
    document: Option<Document>,
    file_path: Option<PathBuf>,
    scene: ToolpathScene<Window>,
    theme: viewport::Theme,
}

impl ViewerState {
    fn new() -> Self {
        Self {
            document: None,
            file_path: None,
            scene: ToolpathScene::new(),
            theme: viewport::Theme::Dark,
        }
    }

    /// Parse a file and swap it onto the display.
    ///
    /// On failure (unreadable file, no extrusion) the previous document and
    /// its primitives stay untouched.
    fn load_file(&mut self, window: &mut Window, path: PathBuf) -> gcode_viewer::Result<usize> {
        let text = fs::read_to_string(&path)?;
        let document = parse(&text);
        let count = self.scene.show(window, &document)?;

        self.document = Some(document);
        self.file_path = Some(path);
        Ok(count)
    }

    fn window_title(&self) -> String {
        if let Some(ref path) = self.file_path {
            format!("G-code Viewer - {}", path.display())
        } else {
            "G-code Viewer - No file loaded".to_string()
        }
    }
}

/// Launch the interactive viewer
fn run_viewer(file_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = ViewerState::new();

    let mut window = Window::new(&state.window_title());
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(Some(60));
    let bg = state.theme.background_color();
    window.set_background_color(bg.0, bg.1, bg.2);

    let mut camera = viewport::plate_camera();

    if let Some(path) = file_path {
        println!("Loading: {}", path.display());
        match state.load_file(&mut window, path) {
            Ok(count) => {
                println!("✓ Toolpath loaded: {} primitives", count);
                print_document_info(&state);
            }
            Err(e) => eprintln!("✗ Error loading file: {}", e),
        }
        window.set_title(&state.window_title());
    } else {
        println!("Starting viewer with empty scene...");
        println!("Press Ctrl+O to open a G-code file");
    }

    print_controls();

    while window.render_with_camera(&mut camera) {
        viewport::draw_plate(&mut window);

        for event in window.events().iter() {
            match event.value {
                WindowEvent::Key(Key::O, Action::Press, modifiers)
                    if modifiers.contains(Modifiers::Control) =>
                {
                    if let Some(path) = open_file_dialog() {
                        match state.load_file(&mut window, path) {
                            Ok(count) => {
                                println!("\n✓ Toolpath loaded: {} primitives", count);
                                print_document_info(&state);
                            }
                            Err(e) => eprintln!("\n✗ Error loading file: {}", e),
                        }
                        window.set_title(&state.window_title());
                    }
                }
                WindowEvent::Key(Key::R, Action::Press, _) => {
                    viewport::recenter(&mut camera);
                    println!("Camera reset");
                }
                WindowEvent::Key(Key::T, Action::Press, _) => {
                    state.theme = state.theme.next();
                    let bg = state.theme.background_color();
                    window.set_background_color(bg.0, bg.1, bg.2);
                    println!("Theme changed to: {}", state.theme.name());
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Open a file dialog to select a G-code file
fn open_file_dialog() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("G-code Files", &["gcode", "gco", "g"])
        .add_filter("All Files", &["*"])
        .set_title("Open G-code File")
        .pick_file()
}

/// Print a summary of the loaded document
fn print_document_info(state: &ViewerState) {
    let Some(ref document) = state.document else {
        return;
    };
    println!();
    println!("═══════════════════════════════════════════════════════════");
    println!("  Toolpath Information:");
    println!("  - Layers:   {}", document.layer_count());
    println!("  - Segments: {}", document.segment_count());
    if let Some((low, high)) = document.z_range() {
        println!("  - Z range:  {:.2} – {:.2} mm", low, high);
    }
    println!("═══════════════════════════════════════════════════════════");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_left_short_name_unchanged() {
        assert_eq!(truncate_left("part.gcode", 34), "part.gcode");
    }

    #[test]
    fn test_truncate_left_keeps_tail_within_budget() {
        let name = "/home/user/prints/projects/benchy/benchy_0.2mm.gcode";
        let truncated = truncate_left(name, 34);
        assert!(truncated.starts_with("..."));
        assert!(truncated.len() <= 34);
        assert!(truncated.ends_with("benchy_0.2mm.gcode"));
    }

    #[test]
    fn test_truncate_left_multibyte_boundary() {
        // A path of multibyte characters must not split one mid-sequence.
        let name = "/дом/печать/".repeat(4) + "модель.gcode";
        let truncated = truncate_left(&name, 34);
        assert!(truncated.starts_with("..."));
        assert!(truncated.len() <= 34);
        assert!(truncated.ends_with(".gcode"));
    }
}

/// Print controls information
fn print_controls() {
    println!("═══════════════════════════════════════════════════════════");
    println!("  Interactive Viewer Controls");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("  Left Mouse + Drag  : Rotate view");
    println!("  Right Mouse + Drag : Pan view");
    println!("  Scroll Wheel       : Zoom in/out");
    println!("  Ctrl+O             : Open file");
    println!("  R                  : Reset camera");
    println!("  T                  : Cycle background themes");
    println!("  ESC / Close Window : Exit viewer");
    println!();
    println!("═══════════════════════════════════════════════════════════");
}
