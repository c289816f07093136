#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use shetran_core::config::RunConfig;
use shetran_core::tools::{Tool, ToolError, ToolExecutor, ToolInput, ToolOutput};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub const CATCHMENT: &str = "123456";

/// A `DATA_PATH` tree in a temp directory.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    /// Empty `inputs/` directory.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("inputs")).expect("create inputs");
        Self { dir }
    }

    /// A full input set for [`CATCHMENT`], plus one file of another
    /// catchment that must never be staged.
    pub fn standard() -> Self {
        let fixture = Self::empty();
        fixture.input("123456_DEM.asc", "ncols 10");
        fixture.input("123456_Mask.asc", "ncols 10");
        fixture.input("123456_NFM_max_storage.asc", "max storage");
        fixture.input("123456_NFM_max_woodland.asc", "max woodland");
        fixture.input("123456_NFM_balanced_storage.asc", "balanced storage");
        fixture.input("123456_NFM_balanced_woodland.asc", "balanced woodland");
        fixture.input("123456_LandCover_UDM_2017.asc", "baseline land cover");
        fixture.input("123456_LandCover_UDM_GB_LandCover_SSP2_2050.asc", "ssp2 land cover");
        fixture.input("123456_autocal_LibraryFile.xml", "<library/>");
        fixture.input("123456_results.csv", "param,value");
        fixture.climate_zip(
            "123456_climate_files_rcp85.zip",
            &[("123456_Precip.csv", "1,2,3"), ("123456_PET.csv", "4,5,6")],
        );
        fixture.climate_zip("123456_climate_files_rcp26.zip", &[("123456_Precip.csv", "0")]);
        fixture.input("654321_DEM.asc", "other catchment");
        fixture
    }

    pub fn data_path(&self) -> &Path {
        self.dir.path()
    }

    pub fn inputs(&self) -> PathBuf {
        self.dir.path().join("inputs")
    }

    pub fn outputs(&self) -> PathBuf {
        self.dir.path().join("outputs")
    }

    pub fn run_folder(&self) -> PathBuf {
        self.outputs().join("run_folder")
    }

    pub fn input(&self, name: &str, body: &str) {
        std::fs::write(self.inputs().join(name), body).expect("write input");
    }

    pub fn remove_input(&self, name: &str) {
        std::fs::remove_file(self.inputs().join(name)).expect("remove input");
    }

    pub fn climate_zip(&self, name: &str, entries: &[(&str, &str)]) {
        let file = std::fs::File::create(self.inputs().join(name)).expect("create zip");
        let mut writer = zip::ZipWriter::new(file);
        for (entry, body) in entries {
            writer
                .start_file(*entry, SimpleFileOptions::default())
                .expect("start entry");
            writer.write_all(body.as_bytes()).expect("write entry");
        }
        writer.finish().expect("finish zip");
    }

    /// Config for [`CATCHMENT`] / `rcp85` with `overrides` applied on top.
    pub fn config(&self, overrides: &[(&str, &str)]) -> RunConfig {
        let mut vars: HashMap<String, String> = HashMap::from([
            (
                "DATA_PATH".to_string(),
                self.data_path().display().to_string(),
            ),
            ("CATCHMENT_NAME".to_string(), CATCHMENT.to_string()),
            ("CLIMATE_SCENARIO".to_string(), "rcp85".to_string()),
        ]);
        for (key, value) in overrides {
            vars.insert(key.to_string(), value.to_string());
        }
        RunConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid config")
    }

    pub fn run_folder_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.run_folder())
            .expect("read run folder")
            .map(|e| e.expect("entry").file_name().into_string().expect("utf-8"))
            .collect();
        names.sort();
        names
    }

    pub fn log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(self.outputs().join("logfile.txt"))
            .expect("read log")
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// One recorded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub tool: String,
    pub args: Vec<String>,
}

/// Stands in for the SHETRAN executables.
///
/// Records every call and writes the files the real tools would leave in
/// the run folder, unless told not to.
pub struct FakeTools {
    pub calls: Mutex<Vec<Call>>,
    pub write_library: bool,
    pub write_rundata: bool,
    pub exit_code: i32,
    pub missing: Option<Tool>,
}

impl Default for FakeTools {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            write_library: true,
            write_rundata: true,
            exit_code: 0,
            missing: None,
        }
    }
}

impl FakeTools {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.tool).collect()
    }

    fn simulate(&self, tool: &str, args: &[String]) {
        match tool {
            "shetran-setup-UDM-linux" | "shetran-setup-CEH2Types-linux" => {
                if self.write_library {
                    // The converter writes `{catchment}_LibraryFile_UDM.xml`
                    // next to its `{run_folder}/{catchment}` argument.
                    std::fs::write(format!("{}_LibraryFile_UDM.xml", args[0]), "<udm/>")
                        .expect("write library");
                }
            }
            "shetran-prepare-snow" => {
                if self.write_rundata {
                    let dir = Path::new(&args[0]).parent().expect("library dir");
                    std::fs::write(dir.join(format!("rundata_{CATCHMENT}.txt")), "run")
                        .expect("write rundata");
                }
            }
            "shetran-linux" => {
                let dir = Path::new(&args[1]).parent().expect("rundata dir");
                std::fs::write(dir.join("output_discharge.csv"), "q").expect("write output");
            }
            other => panic!("unexpected tool {other}"),
        }
    }
}

impl ToolExecutor for FakeTools {
    async fn execute(&self, program: &Path, input: ToolInput) -> Result<ToolOutput, ToolError> {
        let tool = program
            .file_name()
            .and_then(|n| n.to_str())
            .expect("tool name")
            .to_string();
        let args: Vec<String> = input
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        self.calls.lock().expect("lock").push(Call {
            tool: tool.clone(),
            args: args.clone(),
        });

        if self.missing.map(Tool::binary_name) == Some(tool.as_str()) {
            return Err(ToolError::NotFound(program.display().to_string()));
        }

        self.simulate(&tool, &args);

        Ok(ToolOutput {
            stdout: format!("{tool} done\n"),
            stderr: String::new(),
            exit_code: self.exit_code,
            duration_ms: 1,
        })
    }
}
