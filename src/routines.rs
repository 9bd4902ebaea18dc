//! The plotting routines the command line can name.
//!
//! Each routine takes the shared options plus its positional arguments
//! (conventionally an input data file and an output image file) and
//! writes exactly one image.

use crate::command::{require_args, Options};
use crate::data::DataFile;
use crate::plot::{self, Series};
use anyhow::Result;
use std::collections::BTreeSet;
use std::path::Path;

/// Prefix of the per-core backlog columns in the net analyzer's output.
const BACKLOG_PREFIX: &str = "Back";

/// Core numbers to plot: the ids found in the file, intersected with the
/// `--cores` filter when one was given, ascending either way. Filter ids
/// absent from the file are dropped silently.
fn effective_ids(found: BTreeSet<u32>, filter: Option<&[u32]>) -> Vec<u32> {
    match filter {
        Some(filter) => found
            .into_iter()
            .filter(|id| filter.contains(id))
            .collect(),
        None => found.into_iter().collect(),
    }
}

/// Legend label for one core's series, zero-padded so the entries line
/// up: core 7 is always `C07`.
fn core_label(id: u32) -> String {
    format!("C{:02}", id)
}

/// Plot the per-core network backlog over time, one line per GRO core.
///
/// Expects the per-node backlog data file written by the net analyzer
/// and the name of the image file to produce. Honors the `--cores`
/// filter; filtering away every core still writes an empty plot.
pub fn backlog(options: &Options, args: &[String]) -> Result<()> {
    require_args("backlog", 2, args)?;
    let data = DataFile::load(&args[0])?;
    let out = Path::new(&args[1]);

    let ids = effective_ids(data.ids(BACKLOG_PREFIX), options.cores.as_deref());
    let columns: Vec<String> = ids
        .iter()
        .map(|id| format!("{}{}", BACKLOG_PREFIX, id))
        .collect();

    let times = data.column("Time")?;
    let x_max = times.iter().copied().fold(0.0f64, f64::max);
    // The y scale tracks the columns actually drawn, so filtering changes
    // the scale with it.
    let y_max = data.max_value(&columns)?;

    let mut series = Vec::with_capacity(ids.len());
    for (id, column) in ids.iter().zip(&columns) {
        series.push(Series {
            label: core_label(*id),
            values: data.column(column)?.to_vec(),
        });
    }

    plot::render_lines(
        out,
        x_max,
        y_max,
        "Time",
        &format!("KB In Flight For {} Cores", data.node_name()),
        times,
        &series,
    )
}

/// Write the palette reference image. Takes only the output file name.
pub fn colors(_options: &Options, args: &[String]) -> Result<()> {
    require_args("colors", 1, args)?;
    plot::render_palette(Path::new(&args[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn unique_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "traceplot_routines_test_{}_{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos(),
            name
        ));
        p
    }

    fn ids(list: &[u32]) -> BTreeSet<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn filter_intersects_and_sorts() {
        assert_eq!(
            effective_ids(ids(&[0, 1, 2, 5]), Some(&[9, 5, 1])),
            vec![1, 5]
        );
    }

    #[test]
    fn no_filter_keeps_every_id_ascending() {
        assert_eq!(effective_ids(ids(&[2, 0, 1]), None), vec![0, 1, 2]);
    }

    #[test]
    fn filter_can_exclude_everything() {
        assert_eq!(effective_ids(ids(&[0, 1, 2]), Some(&[7, 8])), Vec::<u32>::new());
    }

    #[test]
    fn core_labels_are_zero_padded_and_stable() {
        assert_eq!(core_label(7), "C07");
        assert_eq!(core_label(0), "C00");
        assert_eq!(core_label(12), "C12");
    }

    fn write_sample_data(path: &Path) {
        fs::write(
            path,
            "# Node: node3\n\
             Time Back2 Back7\n\
             1020.0 0.0 12.4\n\
             1040.0 3.1 10.9\n\
             1060.0 9.0 1.5\n",
        )
        .unwrap();
    }

    #[test]
    fn backlog_plots_one_line_per_core() {
        let data_path = unique_path("full.dat");
        let plot_path = unique_path("full.svg");
        write_sample_data(&data_path);

        let args = vec![
            data_path.to_string_lossy().into_owned(),
            plot_path.to_string_lossy().into_owned(),
        ];
        backlog(&Options::default(), &args).unwrap();

        let svg = fs::read_to_string(&plot_path).unwrap();
        assert!(svg.contains("C02"));
        assert!(svg.contains("C07"));
        assert!(svg.contains("KB In Flight For node3 Cores"));

        let _ = fs::remove_file(&data_path);
        let _ = fs::remove_file(&plot_path);
    }

    #[test]
    fn backlog_honors_the_core_filter() {
        let data_path = unique_path("filtered.dat");
        let plot_path = unique_path("filtered.svg");
        write_sample_data(&data_path);

        let options = Options {
            cores: Some(vec![7, 9]),
        };
        let args = vec![
            data_path.to_string_lossy().into_owned(),
            plot_path.to_string_lossy().into_owned(),
        ];
        backlog(&options, &args).unwrap();

        let svg = fs::read_to_string(&plot_path).unwrap();
        assert!(svg.contains("C07"));
        assert!(!svg.contains("C02"));

        let _ = fs::remove_file(&data_path);
        let _ = fs::remove_file(&plot_path);
    }

    #[test]
    fn backlog_filtered_to_nothing_still_writes_an_image() {
        let data_path = unique_path("none.dat");
        let plot_path = unique_path("none.svg");
        write_sample_data(&data_path);

        let options = Options {
            cores: Some(vec![30, 31]),
        };
        let args = vec![
            data_path.to_string_lossy().into_owned(),
            plot_path.to_string_lossy().into_owned(),
        ];
        backlog(&options, &args).unwrap();
        assert!(fs::metadata(&plot_path).unwrap().len() > 0);

        let _ = fs::remove_file(&data_path);
        let _ = fs::remove_file(&plot_path);
    }

    #[test]
    fn backlog_missing_data_file_propagates() {
        let plot_path = unique_path("missing.svg");
        let args = vec![
            unique_path("does_not_exist.dat").to_string_lossy().into_owned(),
            plot_path.to_string_lossy().into_owned(),
        ];
        let err = backlog(&Options::default(), &args).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read data file"));
        assert!(!plot_path.exists());
    }

    #[test]
    fn colors_writes_the_reference_image() {
        let plot_path = unique_path("colors.svg");
        let args = vec![plot_path.to_string_lossy().into_owned()];
        colors(&Options::default(), &args).unwrap();
        assert!(fs::metadata(&plot_path).unwrap().len() > 0);
        let _ = fs::remove_file(&plot_path);
    }
}
