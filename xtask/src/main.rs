use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for cubedrift")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, deny, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Run cargo deny check
    Deny,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Generate the demo textures under assets/
    GenAssets {
        /// Output directory for the generated textures
        #[arg(long, default_value = "assets")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_deny()?;
            run_doc()?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Deny => run_deny()?,
        Commands::Doc => run_doc()?,
        Commands::Build => run_build()?,
        Commands::GenAssets { out_dir } => run_gen_assets(&out_dir)?,
    }

    Ok(())
}

fn run_fmt() -> Result<()> {
    println!("==> Running cargo fmt --check");
    let status = Command::new("cargo")
        .args(["fmt", "--all", "--", "--check"])
        .status()?;
    if !status.success() {
        anyhow::bail!("cargo fmt check failed");
    }
    Ok(())
}

fn run_clippy() -> Result<()> {
    println!("==> Running cargo clippy");
    let status = Command::new("cargo")
        .args([
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ])
        .status()?;
    if !status.success() {
        anyhow::bail!("cargo clippy failed");
    }
    Ok(())
}

fn run_tests() -> Result<()> {
    println!("==> Running cargo test");
    let status = Command::new("cargo")
        .args(["test", "--workspace"])
        .status()?;
    if !status.success() {
        anyhow::bail!("cargo test failed");
    }
    Ok(())
}

fn run_deny() -> Result<()> {
    println!("==> Running cargo deny check (licenses bans sources)");
    let status = Command::new("cargo")
        .args(["deny", "check", "licenses", "bans", "sources"])
        .status()?;
    if !status.success() {
        anyhow::bail!("cargo deny check failed");
    }
    Ok(())
}

fn run_doc() -> Result<()> {
    println!("==> Running cargo doc");
    let status = Command::new("cargo")
        .args(["doc", "--workspace", "--no-deps"])
        .status()?;
    if !status.success() {
        anyhow::bail!("cargo doc failed");
    }
    Ok(())
}

fn run_build() -> Result<()> {
    println!("==> Running cargo build");
    let status = Command::new("cargo")
        .args(["build", "--workspace"])
        .status()?;
    if !status.success() {
        anyhow::bail!("cargo build failed");
    }
    Ok(())
}

fn run_gen_assets(out_dir: &Path) -> Result<()> {
    println!("==> Generating demo textures");
    std::fs::create_dir_all(out_dir)?;
    let crate_path = out_dir.join("crate.png");
    let decal_path = out_dir.join("decal.png");
    crate_texture().save(&crate_path)?;
    decal_texture().save(&decal_path)?;
    println!(
        "==> Wrote {} and {}",
        crate_path.display(),
        decal_path.display()
    );
    Ok(())
}

/// 128x128 base texture: brown checker planks inside a dark frame.
fn crate_texture() -> image::RgbaImage {
    const SIZE: u32 = 128;
    image::RgbaImage::from_fn(SIZE, SIZE, |x, y| {
        if x < 6 || y < 6 || x >= SIZE - 6 || y >= SIZE - 6 {
            return image::Rgba([74, 48, 22, 255]);
        }
        if ((x / 16) + (y / 16)) % 2 == 0 {
            image::Rgba([173, 126, 74, 255])
        } else {
            image::Rgba([140, 98, 57, 255])
        }
    })
}

/// 128x128 accent texture: a bright ring on a light ground.
fn decal_texture() -> image::RgbaImage {
    const SIZE: u32 = 128;
    let center = (SIZE as f32 - 1.0) / 2.0;
    image::RgbaImage::from_fn(SIZE, SIZE, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        let radius = (dx * dx + dy * dy).sqrt();
        if (28.0..44.0).contains(&radius) {
            image::Rgba([235, 196, 32, 255])
        } else {
            image::Rgba([222, 222, 214, 255])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_texture_has_frame_and_checker() {
        let img = crate_texture();
        assert_eq!(img.dimensions(), (128, 128));
        assert_eq!(img.get_pixel(0, 0), &image::Rgba([74, 48, 22, 255]));
        assert_ne!(img.get_pixel(20, 20), img.get_pixel(20, 40));
    }

    #[test]
    fn decal_texture_ring_differs_from_ground() {
        let img = decal_texture();
        let center = img.get_pixel(64, 64);
        let on_ring = img.get_pixel(64, 64 + 36);
        assert_ne!(center, on_ring);
    }
}
