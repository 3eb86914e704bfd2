//! Output file names.

use std::path::{Path, PathBuf};

use qg_common::Variable;

use crate::config::{Snapshot, ID_MARKER};

/// Base name shared by all plots of a snapshot.
///
/// Without an output template this is the snapshot's file stem, in the
/// working directory.
pub fn plot_base(snapshot: &Snapshot, output: Option<&str>) -> String {
    match (output, &snapshot.id) {
        (Some(template), Some(id)) => template.replace(ID_MARKER, id),
        (Some(template), None) => template.to_string(),
        (None, _) => snapshot
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

/// `<base>_<variable>.jpg`, or `<base>_<variable>_incr.jpg` for increments.
pub fn plot_path(
    snapshot: &Snapshot,
    output: Option<&str>,
    variable: Variable,
    increment: bool,
) -> PathBuf {
    let suffix = if increment { "_incr" } else { "" };
    PathBuf::from(format!(
        "{}_{}{}.jpg",
        plot_base(snapshot, output),
        variable.code(),
        suffix
    ))
}

/// The animation is named after its first frame.
pub fn animation_path(first_frame: &Path) -> PathBuf {
    first_frame.with_extension("gif")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(path: &str, id: Option<&str>) -> Snapshot {
        Snapshot {
            path: PathBuf::from(path),
            id: id.map(str::to_string),
        }
    }

    #[test]
    fn test_stem_without_output() {
        let s = snapshot("/data/run/qg.fc.2010-01-01.nc", None);
        assert_eq!(
            plot_path(&s, None, Variable::Streamfunction, false),
            PathBuf::from("qg.fc.2010-01-01_x.jpg")
        );
        assert_eq!(
            plot_path(&s, None, Variable::PotentialVorticity, true),
            PathBuf::from("qg.fc.2010-01-01_q_incr.jpg")
        );
    }

    #[test]
    fn test_output_template_takes_id() {
        let s = snapshot("/data/ens_003.nc", Some("003"));
        assert_eq!(
            plot_path(&s, Some("plots/member_%id%"), Variable::Streamfunction, true),
            PathBuf::from("plots/member_003_x_incr.jpg")
        );
    }

    #[test]
    fn test_output_without_animation_is_literal() {
        let s = snapshot("state.nc", None);
        assert_eq!(
            plot_path(&s, Some("out/fig"), Variable::PotentialVorticity, false),
            PathBuf::from("out/fig_q.jpg")
        );
    }

    #[test]
    fn test_animation_path_from_first_frame() {
        assert_eq!(
            animation_path(Path::new("plots/member_003_x_incr.jpg")),
            PathBuf::from("plots/member_003_x_incr.gif")
        );
    }
}
