use std::fs;
use std::path::{Path, PathBuf};

use sgp4::Elements;

use crate::predict::error::PredictError;
use crate::predict::orbital::{ModelSource, Orbital, PositionModel};
use crate::predict::types::SatelliteInfo;

pub struct TleEntry {
    pub info: SatelliteInfo,
    pub elements: Elements,
}

/// Directory of TLE files, re-read each time a model is opened so that
/// refreshed element sets are picked up without a restart.
pub struct TleCatalog {
    tle_dir: PathBuf,
    satellite: String,
}

impl TleCatalog {
    pub fn new(tle_dir: PathBuf, satellite: impl Into<String>) -> Self {
        Self {
            tle_dir,
            satellite: satellite.into(),
        }
    }

    /// Load all TLE files from the directory
    pub fn load_all(&self) -> Result<Vec<TleEntry>, PredictError> {
        if !self.tle_dir.exists() {
            return Err(PredictError::DirectoryNotFound(
                self.tle_dir.display().to_string(),
            ));
        }

        let mut satellites = Vec::new();

        let mut paths = fs::read_dir(&self.tle_dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        paths.sort();

        for path in paths {
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension() else {
                continue;
            };
            if ext == "tle" || ext == "txt" {
                match parse_tle_file(&path) {
                    Ok(entries) => satellites.extend(entries),
                    Err(e) => {
                        log::warn!("Failed to parse TLE file {}: {}", path.display(), e);
                    }
                }
            }
        }

        Ok(satellites)
    }

    /// Find the configured satellite by name (case-insensitive) or NORAD id.
    pub fn find(&self) -> Result<TleEntry, PredictError> {
        let wanted = self.satellite.trim();
        let norad: Option<u32> = wanted.parse().ok();

        self.load_all()?
            .into_iter()
            .find(|entry| match norad {
                Some(id) => entry.info.norad_id == id,
                None => entry.info.name.eq_ignore_ascii_case(wanted),
            })
            .ok_or_else(|| PredictError::UnknownSatellite(wanted.to_string()))
    }
}

impl ModelSource for TleCatalog {
    fn open(&self) -> Result<Box<dyn PositionModel>, PredictError> {
        let entry = self.find()?;
        Ok(Box::new(Orbital::new(entry.info, entry.elements)?))
    }

    fn describe(&self) -> String {
        self.satellite.clone()
    }
}

/// Parse a single TLE file (may contain multiple satellites)
fn parse_tle_file(path: &Path) -> Result<Vec<TleEntry>, PredictError> {
    let content = fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    parse_tle_content(&content, &filename)
}

fn parse_tle_content(content: &str, filename: &str) -> Result<Vec<TleEntry>, PredictError> {
    let mut results = Vec::new();

    for (name, line1, line2) in parse_multi_tle(content) {
        let elements = Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())
            .map_err(|e| PredictError::InvalidTle {
                file: filename.to_string(),
                message: e.to_string(),
            })?;

        let sat_name = name.unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

        results.push(TleEntry {
            info: SatelliteInfo {
                name: sat_name,
                norad_id: elements.norad_id as u32,
                tle_source: filename.to_string(),
            },
            elements,
        });
    }

    Ok(results)
}

/// Parse multi-satellite TLE content
fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            // 2-line TLE (no name)
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            // 3-line TLE (with name); Celestrak prefixes names with "0 "
            let name = lines[i].strip_prefix("0 ").unwrap_or(lines[i]).trim();
            result.push((
                Some(name.to_string()),
                lines[i + 1].to_string(),
                lines[i + 2].to_string(),
            ));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::orbital::tests::TERRA_TLE;
    use chrono::{TimeZone, Utc};

    const ISS_TLE: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("terra-watch-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parses_two_and_three_line_sets() {
        let content = format!("{}\n\n{}\n", TERRA_TLE, ISS_TLE);
        let sets = parse_multi_tle(&content);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].0.as_deref(), Some("TERRA"));
        assert_eq!(sets[1].0, None);
    }

    #[test]
    fn strips_celestrak_name_prefix() {
        let content = TERRA_TLE.replacen("TERRA", "0 TERRA", 1);
        let sets = parse_multi_tle(&content);
        assert_eq!(sets[0].0.as_deref(), Some("TERRA"));
    }

    #[test]
    fn unnamed_sets_get_norad_name() {
        let entries = parse_tle_content(ISS_TLE, "iss.tle").unwrap();
        assert_eq!(entries[0].info.name, "NORAD 25544");
        assert_eq!(entries[0].info.norad_id, 25544);
    }

    #[test]
    fn rejects_bad_checksum() {
        let broken = TERRA_TLE.replace("0  9994", "0  9990");
        assert!(matches!(
            parse_tle_content(&broken, "bad.tle"),
            Err(PredictError::InvalidTle { .. })
        ));
    }

    #[test]
    fn finds_satellite_by_name_or_norad_id() {
        let dir = scratch_dir("find");
        fs::write(dir.join("active.txt"), format!("{}\n{}\n", ISS_TLE, TERRA_TLE)).unwrap();
        fs::write(dir.join("notes.md"), "not a tle").unwrap();

        let by_name = TleCatalog::new(dir.clone(), "terra").find().unwrap();
        assert_eq!(by_name.info.norad_id, 25994);

        let by_id = TleCatalog::new(dir.clone(), "25544").find().unwrap();
        assert_eq!(by_id.info.name, "NORAD 25544");

        let missing = TleCatalog::new(dir.clone(), "AQUA").find();
        assert!(matches!(missing, Err(PredictError::UnknownSatellite(_))));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn open_returns_working_model() {
        let dir = scratch_dir("open");
        fs::write(dir.join("terra.tle"), TERRA_TLE).unwrap();

        let catalog = TleCatalog::new(dir.clone(), "TERRA");
        let model = catalog.open().unwrap();
        let at = Utc.with_ymd_and_hms(2024, 10, 17, 0, 0, 0).unwrap();
        let pos = model.position(at).unwrap();
        assert!(pos.altitude_km > 600.0);
        assert_eq!(catalog.describe(), "TERRA");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let catalog = TleCatalog::new(PathBuf::from("/nonexistent/terra-watch"), "TERRA");
        assert!(matches!(
            catalog.open(),
            Err(PredictError::DirectoryNotFound(_))
        ));
    }
}
