use std::{fs, io, path::PathBuf};

use directories_next::ProjectDirs;

/// Returns path to the local snapshot metadata database in the default data dir.
pub fn get_database_path() -> io::Result<PathBuf> {
    Ok(get_default_data_dir()?.join("snapshots.sqlite"))
}

fn get_default_data_dir() -> io::Result<PathBuf> {
    let project_dirs = ProjectDirs::from("org", "snapshots", "snapshots").ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "could not determine project directory",
        )
    })?;
    let data_dir = project_dirs.data_local_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.to_path_buf())
}
