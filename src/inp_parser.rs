//! EPANET `.inp` model parser.
//!
//! Extracts element identifiers per category and the two scalar options the
//! bridge needs (hydraulic timestep and water quality mode). Malformed lines
//! are skipped and malformed option values fall back to their defaults. Only
//! an unreadable file is an error.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::mapping::ObjectType;
use crate::utils::duration::parse_clock_duration;

/// Hydraulic timestep used when `[TIMES]` does not provide a usable value
pub const DEFAULT_HYDRAULIC_TIMESTEP: u64 = 3600;

/// Errors that can occur while reading an `.inp` file
#[derive(Debug, thiserror::Error)]
pub enum InpError {
    #[error("Input file '{}' could not be read: {source}", .path.display())]
    FileNotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Element IDs and options read from an EPANET network file
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkModel {
    pub junctions: Vec<String>,
    pub reservoirs: Vec<String>,
    pub tanks: Vec<String>,
    pub pipes: Vec<String>,
    pub pumps: Vec<String>,
    pub valves: Vec<String>,
    pub patterns: Vec<String>,
    /// Hydraulic timestep in seconds
    pub hydraulic_timestep: u64,
    /// True when `[OPTIONS] Quality` is anything other than NONE
    pub quality_enabled: bool,
}

impl Default for NetworkModel {
    fn default() -> Self {
        Self {
            junctions: Vec::new(),
            reservoirs: Vec::new(),
            tanks: Vec::new(),
            pipes: Vec::new(),
            pumps: Vec::new(),
            valves: Vec::new(),
            patterns: Vec::new(),
            hydraulic_timestep: DEFAULT_HYDRAULIC_TIMESTEP,
            quality_enabled: false,
        }
    }
}

impl NetworkModel {
    /// All node IDs in junction, reservoir, tank order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.junctions
            .iter()
            .chain(&self.reservoirs)
            .chain(&self.tanks)
            .map(String::as_str)
    }

    /// All link IDs in pipe, pump, valve order
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.pipes
            .iter()
            .chain(&self.pumps)
            .chain(&self.valves)
            .map(String::as_str)
    }

    /// Resolve an element ID to its object type.
    ///
    /// Nodes win over links, and links over patterns, when the same ID is
    /// declared in more than one section.
    pub fn object_type_of(&self, element_id: &str) -> Option<ObjectType> {
        if self.nodes().any(|id| id == element_id) {
            Some(ObjectType::Node)
        } else if self.links().any(|id| id == element_id) {
            Some(ObjectType::Link)
        } else if self.patterns.iter().any(|id| id == element_id) {
            Some(ObjectType::Pattern)
        } else {
            None
        }
    }
}

/// Sections the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Section {
    Junctions,
    Reservoirs,
    Tanks,
    Pipes,
    Pumps,
    Valves,
    Patterns,
    Times,
    Options,
}

impl Section {
    fn from_header(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "JUNCTIONS" => Some(Section::Junctions),
            "RESERVOIRS" => Some(Section::Reservoirs),
            "TANKS" => Some(Section::Tanks),
            "PIPES" => Some(Section::Pipes),
            "PUMPS" => Some(Section::Pumps),
            "VALVES" => Some(Section::Valves),
            "PATTERNS" => Some(Section::Patterns),
            "TIMES" => Some(Section::Times),
            "OPTIONS" => Some(Section::Options),
            _ => None,
        }
    }
}

/// Match: "[ NAME ]" with optional whitespace inside the brackets
static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\s*([A-Za-z_]+)\s*\]").expect("Invalid section header regex"));

/// Single-pass line parser tracking the section currently being read
struct InpParser {
    model: NetworkModel,
    current: Option<Section>,
    seen: HashSet<Section>,
    timestep_found: bool,
    quality_found: bool,
}

impl InpParser {
    fn new() -> Self {
        Self {
            model: NetworkModel::default(),
            current: None,
            seen: HashSet::new(),
            timestep_found: false,
            quality_found: false,
        }
    }

    fn enter_section(&mut self, line: &str) {
        let section = SECTION_HEADER
            .captures(line)
            .and_then(|caps| Section::from_header(&caps[1]));

        self.current = match section {
            Some(section) if !self.seen.insert(section) => {
                debug!("Skipping repeated section header '{}'", line);
                None
            }
            other => other,
        };
    }

    fn parse_line(&mut self, raw: &str) {
        // Remove comments
        let line = raw.split(';').next().unwrap_or("").trim();
        if line.is_empty() {
            return;
        }

        if line.starts_with('[') {
            self.enter_section(line);
            return;
        }

        let Some(section) = self.current else {
            return;
        };

        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return;
        };

        let list = match section {
            Section::Junctions => &mut self.model.junctions,
            Section::Reservoirs => &mut self.model.reservoirs,
            Section::Tanks => &mut self.model.tanks,
            Section::Pipes => &mut self.model.pipes,
            Section::Pumps => &mut self.model.pumps,
            Section::Valves => &mut self.model.valves,
            Section::Patterns => &mut self.model.patterns,
            Section::Times => {
                self.parse_times_line(first, tokens);
                return;
            }
            Section::Options => {
                self.parse_options_line(first, tokens);
                return;
            }
        };
        list.push(first.to_string());
    }

    fn parse_times_line<'a>(&mut self, first: &str, mut rest: impl Iterator<Item = &'a str>) {
        if self.timestep_found || !first.eq_ignore_ascii_case("Hydraulic") {
            return;
        }
        if !rest.next().is_some_and(|t| t.eq_ignore_ascii_case("Timestep")) {
            return;
        }
        let Some(value) = rest.next() else {
            return;
        };

        self.timestep_found = true;
        match parse_clock_duration(value) {
            Ok(seconds) => self.model.hydraulic_timestep = seconds,
            Err(e) => debug!("Keeping default hydraulic timestep: {}", e),
        }
    }

    fn parse_options_line<'a>(&mut self, first: &str, mut rest: impl Iterator<Item = &'a str>) {
        if self.quality_found || !first.eq_ignore_ascii_case("Quality") {
            return;
        }
        if let Some(mode) = rest.next() {
            self.quality_found = true;
            self.model.quality_enabled = mode.to_uppercase() != "NONE";
        }
    }
}

/// Parse the text of an `.inp` file. Never fails; unknown content is ignored.
pub fn parse_inp_str(content: &str) -> NetworkModel {
    let mut parser = InpParser::new();
    for line in content.lines() {
        parser.parse_line(line);
    }
    parser.model
}

/// Read and parse an `.inp` file
pub fn parse_inp_file(path: &Path) -> Result<NetworkModel, InpError> {
    let bytes = fs::read(path).map_err(|source| InpError::FileNotReadable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_inp_str(&String::from_utf8_lossy(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_INP: &str = r#"[TITLE]
Sample network

[JUNCTIONS]
;ID              	Elev        	Demand      	Pattern
 J1              	700         	0           	                	;
 J2              	700         	150         	PAT1            	;

[RESERVOIRS]
;ID              	Head        	Pattern
 R1              	800         	                	;

[TANKS]
;ID              	Elevation   	InitLevel   	MinLevel    	MaxLevel
 TANK_1          	850         	120         	100         	150

[PIPES]
;ID              	Node1           	Node2           	Length
 P1              	J1              	J2              	1000
 P2              	R1              	J1              	500

[PUMPS]
 PUMP_1          	R1              	J1              	HEAD 1	;

[VALVES]
 V1              	J2              	TANK_1          	12  PRV  50

[PATTERNS]
;ID              	Multipliers
 PAT1            	1.0         	1.2         	1.4
 PAT1            	0.8         	0.6

[TIMES]
 Duration           	24:00
 Hydraulic Timestep 	0:05
 Quality Timestep   	0:05

[OPTIONS]
 Units              	GPM
 Quality            	Chemical	mg/L

[END]
"#;

    #[test]
    fn test_parse_sample_network() {
        let model = parse_inp_str(SAMPLE_INP);

        assert_eq!(model.junctions, vec!["J1", "J2"]);
        assert_eq!(model.reservoirs, vec!["R1"]);
        assert_eq!(model.tanks, vec!["TANK_1"]);
        assert_eq!(model.pipes, vec!["P1", "P2"]);
        assert_eq!(model.pumps, vec!["PUMP_1"]);
        assert_eq!(model.valves, vec!["V1"]);
        assert_eq!(model.patterns, vec!["PAT1", "PAT1"]);
        assert_eq!(model.hydraulic_timestep, 300);
        assert!(model.quality_enabled);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let model = parse_inp_str("[JUNCTIONS]\n J1 10 0\n");

        assert_eq!(model.junctions, vec!["J1"]);
        assert!(model.tanks.is_empty());
        assert!(model.patterns.is_empty());
        assert_eq!(model.hydraulic_timestep, DEFAULT_HYDRAULIC_TIMESTEP);
        assert!(!model.quality_enabled);
    }

    #[test]
    fn test_header_case_and_whitespace() {
        let model = parse_inp_str("[ junctions ]\nJ1 10\n[Tanks]  ; storage\nT1 5\n");

        assert_eq!(model.junctions, vec!["J1"]);
        assert_eq!(model.tanks, vec!["T1"]);
    }

    #[test]
    fn test_comment_only_lines_are_skipped() {
        let model = parse_inp_str("[PIPES]\n;ID Node1 Node2\n   ; just a note\n\nP9 A B\n");
        assert_eq!(model.pipes, vec!["P9"]);
    }

    #[test]
    fn test_unknown_section_ends_current_section() {
        let model = parse_inp_str("[JUNCTIONS]\nJ1\n[COORDINATES]\nJ1 1.0 2.0\nX9 3.0 4.0\n");
        assert_eq!(model.junctions, vec!["J1"]);
    }

    #[test]
    fn test_repeated_header_is_parsed_once() {
        let model = parse_inp_str("[TANKS]\nT1\n[PIPES]\nP1\n[TANKS]\nT2\n");

        assert_eq!(model.tanks, vec!["T1"]);
        assert_eq!(model.pipes, vec!["P1"]);
    }

    #[test]
    fn test_hydraulic_timestep_formats() {
        let cases = [
            ("0:05", 300),
            ("0:05:00", 300),
            ("1:00", 3600),
            ("1:00:00", 3600),
            ("0:00:30", 30),
        ];

        for (value, expected) in cases {
            let text = format!("[TIMES]\nHydraulic Timestep {}\n", value);
            assert_eq!(parse_inp_str(&text).hydraulic_timestep, expected, "value {}", value);
        }
    }

    #[test]
    fn test_malformed_timestep_keeps_default() {
        for value in ["abc", "5", "1:2:3:4", "x:05", "9999999999999999:00"] {
            let text = format!("[TIMES]\nHYDRAULIC TIMESTEP {}\n", value);
            assert_eq!(parse_inp_str(&text).hydraulic_timestep, DEFAULT_HYDRAULIC_TIMESTEP);
        }
    }

    #[test]
    fn test_only_first_timestep_line_honored() {
        let text = "[TIMES]\nhydraulic timestep 0:10\nHydraulic Timestep 0:20\n";
        assert_eq!(parse_inp_str(text).hydraulic_timestep, 600);
    }

    #[test]
    fn test_quality_modes() {
        for mode in ["CHEMICAL", "Age", "trace"] {
            let text = format!("[OPTIONS]\nQuality {}\n", mode);
            assert!(parse_inp_str(&text).quality_enabled, "mode {}", mode);
        }

        assert!(!parse_inp_str("[OPTIONS]\nQuality None\n").quality_enabled);
        assert!(!parse_inp_str("[OPTIONS]\nUnits GPM\n").quality_enabled);
    }

    #[test]
    fn test_only_first_quality_line_honored() {
        let text = "[OPTIONS]\nQUALITY NONE\nQuality AGE\n";
        assert!(!parse_inp_str(text).quality_enabled);
    }

    #[test]
    fn test_object_type_resolution() {
        let model = parse_inp_str(SAMPLE_INP);

        assert_eq!(model.object_type_of("TANK_1"), Some(ObjectType::Node));
        assert_eq!(model.object_type_of("R1"), Some(ObjectType::Node));
        assert_eq!(model.object_type_of("PUMP_1"), Some(ObjectType::Link));
        assert_eq!(model.object_type_of("PAT1"), Some(ObjectType::Pattern));
        assert_eq!(model.object_type_of("GHOST"), None);
    }

    #[test]
    fn test_duplicate_id_prefers_node() {
        let model = parse_inp_str("[PATTERNS]\nX 1.0\n[PIPES]\nX A B\n[JUNCTIONS]\nX 10\n");
        assert_eq!(model.object_type_of("X"), Some(ObjectType::Node));
    }

    #[test]
    fn test_node_and_link_order() {
        let model = parse_inp_str(SAMPLE_INP);

        assert_eq!(model.nodes().collect::<Vec<_>>(), vec!["J1", "J2", "R1", "TANK_1"]);
        assert_eq!(model.links().collect::<Vec<_>>(), vec!["P1", "P2", "PUMP_1", "V1"]);
    }

    #[test]
    fn test_parse_inp_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", SAMPLE_INP).unwrap();

        let model = parse_inp_file(temp_file.path()).unwrap();
        assert_eq!(model.tanks, vec!["TANK_1"]);
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_inp_file(Path::new("/nonexistent/network.inp")).unwrap_err();
        assert!(matches!(err, InpError::FileNotReadable { .. }));
    }

    #[test]
    fn test_parse_non_utf8_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[JUNCTIONS]\nJ1 \xff\xfe 10\n[TANKS]\nT\xe91 5\n").unwrap();

        let model = parse_inp_file(temp_file.path()).unwrap();
        assert_eq!(model.junctions, vec!["J1"]);
        assert_eq!(model.tanks, vec!["T\u{FFFD}1"]);
    }
}
