use anyhow::{Context, Result};
use clap::Parser;
use grbdiff::{cli, config, error, export, render, scanner, view};
use grbdiff_common::templates::pick;
use grbdiff_common::{
    find_layer, validate_catalogue, CaseSensitivity, DIFF_TEMPLATES, LAYER_RULES, PNG_TEMPLATES,
    VIEW_TEMPLATES,
};
use cli::{Cli, Commands};
use config::Config;
use export::ClassifiedInput;
use indicatif::{ProgressBar, ProgressStyle};
use render::{GerbvRenderer, Renderer};
use scanner::{GerberInput, Side};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// 入力を解決して判別する
fn load_input(
    path: &Path,
    side: Side,
    single: bool,
    case: CaseSensitivity,
) -> Result<(GerberInput, ClassifiedInput)> {
    let input = scanner::resolve_input(path, side, single)
        .with_context(|| format!("{} を読み込めません: {}", side, path.display()))?;
    if input.filenames.is_empty() {
        return Err(error::GrbDiffError::NoGerberFiles(path.display().to_string()).into());
    }
    let classified = ClassifiedInput::from_input(&input, LAYER_RULES, case);
    Ok((input, classified))
}

#[derive(Serialize)]
struct ClassifyRow<'a> {
    index: usize,
    layer: &'a str,
    gerber1: Option<&'a str>,
    gerber2: Option<&'a str>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    validate_catalogue(LAYER_RULES).context("レイヤーカタログが不正です")?;

    let mut config = Config::load()?;
    let case = config.case_sensitivity(cli.case_sensitive);

    match cli.command {
        Commands::Classify { input1, input2, single, json } => {
            let path1 = config.input_or_last(input1, 1)?;
            let path2 = input2.or_else(|| config.input2.clone());

            let (scan1, side1) = load_input(&path1, Side::One, single, case)?;
            let second = match &path2 {
                Some(path) => Some(load_input(path, Side::Two, single, case)?),
                None => None,
            };

            if config.remember_inputs(Some(path1.as_path()), path2.as_deref()) {
                config.save()?;
            }

            let rows: Vec<ClassifyRow> = LAYER_RULES
                .iter()
                .enumerate()
                .map(|(index, rule)| ClassifyRow {
                    index,
                    layer: rule.name,
                    gerber1: side1.classified.get(index),
                    gerber2: second.as_ref().and_then(|(_, s)| s.classified.get(index)),
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            println!("🔎 grbdiff - レイヤー判別\n");
            println!("Gerber 1: {}", scan1.source.display());
            if let Some((scan2, _)) = &second {
                println!("Gerber 2: {}", scan2.source.display());
            }
            println!();

            for row in &rows {
                let file1 = row.gerber1.unwrap_or("-");
                match &second {
                    Some(_) => println!(
                        "{:>2} {:<22} {:<30} {}",
                        row.index,
                        row.layer,
                        file1,
                        row.gerber2.unwrap_or("-")
                    ),
                    None => println!("{:>2} {:<22} {}", row.index, row.layer, file1),
                }
            }

            let unclaimed = side1.classified.unclaimed(&scan1.filenames);
            if !unclaimed.is_empty() {
                println!("\nGerber 1 の未判別ファイル: {}", unclaimed.join(", "));
            }
            if let Some((scan2, side2)) = &second {
                let unclaimed = side2.classified.unclaimed(&scan2.filenames);
                if !unclaimed.is_empty() {
                    println!("Gerber 2 の未判別ファイル: {}", unclaimed.join(", "));
                }
            }
        }

        Commands::Export { input1, input2, output, dpi, template, single } => {
            println!("🖨 grbdiff - PNG出力・比較\n");

            // gerbvがなければ何も始めない
            let renderer = GerbvRenderer::new(config.gerbv_path.as_deref())?;
            println!("✔ gerbv: {}", renderer.binary().display());
            let settings = config.export_settings(output, dpi, template)?;
            let path1 = config.input_or_last(input1, 1)?;
            let path2 = config.input_or_last(input2, 2)?;

            println!("[1/3] 入力を読み込み中...");
            let (_, side1) = load_input(&path1, Side::One, single, case)?;
            let (_, side2) = load_input(&path2, Side::Two, single, case)?;
            println!(
                "✔ Gerber 1: {}レイヤー / Gerber 2: {}レイヤー\n",
                side1.classified.assigned_count(),
                side2.classified.assigned_count()
            );

            if config.remember_inputs(Some(path1.as_path()), Some(path2.as_path())) {
                config.save()?;
            }

            println!("[2/3] gerbvで出力・比較中...");
            let progress = ProgressBar::new(LAYER_RULES.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")?
                    .progress_chars("=> "),
            );
            let report = export::run_export(LAYER_RULES, &side1, &side2, &settings, &renderer, &progress)?;
            progress.finish_and_clear();
            println!("✔ {}レイヤーを比較", report.compared_count());
            let changed: Vec<&str> = report.changed().map(|r| r.role_name.as_str()).collect();
            if changed.is_empty() {
                println!("✔ 差分なし\n");
            } else {
                println!("⚠ 差分あり: {}\n", changed.join(", "));
            }

            println!("[3/3] レポートを保存中...");
            let report_path = report.save(&settings.export_dir)?;
            println!("✔ レポート: {}\n", report_path.display());

            println!("{}", report.to_text());
            println!("\n✅ 完了: {}", settings.export_dir.display());
        }

        Commands::View { input, side, template, background } => {
            let renderer = GerbvRenderer::new(config.gerbv_path.as_deref())?;
            let slot = if side == 2 { Side::Two } else { Side::One };
            let path = config.input_or_last(input, slot.number())?;

            let (_, classified) = load_input(&path, slot, false, case)?;
            let template = template
                .map(|i| pick(VIEW_TEMPLATES, i))
                .unwrap_or_else(|| config.view_template());

            let mut request = view::view_request(&classified, template);
            if let Some(color) = background {
                request.background = color;
            }
            renderer.render(&request)?;
            println!("✔ gerbvで表示: {} ({}レイヤー)", path.display(), request.layers.len());

            let remembered = match slot {
                Side::One => config.remember_inputs(Some(path.as_path()), None),
                Side::Two => config.remember_inputs(None, Some(path.as_path())),
            };
            if remembered {
                config.save()?;
            }
        }

        Commands::Diff { input1, input2, layer, template, background } => {
            let renderer = GerbvRenderer::new(config.gerbv_path.as_deref())?;
            let path1 = config.input_or_last(input1, 1)?;
            let path2 = config.input_or_last(input2, 2)?;

            let (_, side1) = load_input(&path1, Side::One, false, case)?;
            let (_, side2) = load_input(&path2, Side::Two, false, case)?;

            let role = match layer {
                Some(query) => find_layer(LAYER_RULES, &query)?,
                None => view::choose_layer(LAYER_RULES, &side1, &side2)?,
            };
            let template = template
                .map(|i| pick(DIFF_TEMPLATES, i))
                .unwrap_or_else(|| config.diff_template());

            let mut request = view::diff_request(LAYER_RULES, &side1, &side2, role, template)?;
            if let Some(color) = background {
                request.background = color;
            }
            renderer.render(&request)?;
            println!("✔ gerbvで差分表示: {}", LAYER_RULES[role].name);

            if config.remember_inputs(Some(path1.as_path()), Some(path2.as_path())) {
                config.save()?;
            }
        }

        Commands::Config { show, set_gerbv, set_export_dir, set_dpi } => {
            if let Some(path) = set_gerbv {
                config.set_gerbv_path(path)?;
                println!("✔ gerbvのパスを設定しました");
            }

            if let Some(dir) = set_export_dir {
                config.set_export_dir(dir)?;
                println!("✔ 出力フォルダを設定しました");
            }

            if let Some(dpi) = set_dpi {
                config.set_dpi(dpi)?;
                println!("✔ 解像度を設定しました");
            }

            if show {
                let display = |p: &Option<PathBuf>| {
                    p.as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".to_string())
                };
                println!("設定: {}", Config::config_path()?.display());
                println!("  gerbv: {}", display(&config.gerbv_path));
                println!("  Gerber 1: {}", display(&config.input1));
                println!("  Gerber 2: {}", display(&config.input2));
                println!("  出力フォルダ: {}", display(&config.export_dir));
                println!("  解像度: {} dpi", config.export_dpi);
                println!("  PNGテンプレート: {}", config.png_template().name);
                println!("  表示テンプレート: {}", config.view_template().name);
                println!("  差分テンプレート: {}", config.diff_template().name);
                println!(
                    "  大文字小文字: {}",
                    if config.case_sensitive { "区別する" } else { "区別しない" }
                );
            }
        }

        Commands::Templates => {
            println!("表示テンプレート (view -t):");
            for (i, t) in VIEW_TEMPLATES.iter().enumerate() {
                println!("  {}: {}", i, t.name);
            }
            println!("PNGテンプレート (export -t):");
            for (i, t) in PNG_TEMPLATES.iter().enumerate() {
                println!("  {}: {} [{} / {}]", i, t.name, t.side1, t.side2);
            }
            println!("差分テンプレート (diff -t):");
            for (i, t) in DIFF_TEMPLATES.iter().enumerate() {
                println!("  {}: {} [{} / {}]", i, t.name, t.side1, t.side2);
            }
        }
    }

    Ok(())
}
