//! 文件路径工具与持久化存储

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::UNIX_EPOCH;

/// `ext` 可以是 `".png;.jpg"` 形式的列表，比较时忽略大小写
pub fn is_file_extension(file_name: &str, ext: &str) -> bool {
    let Some(dot) = file_name.rfind('.') else {
        return false;
    };
    let file_ext = &file_name[dot..];
    ext.split(';')
        .map(str::trim)
        .any(|candidate| !candidate.is_empty() && candidate.eq_ignore_ascii_case(file_ext))
}

/// 扩展名（不含点），没有扩展名时为空串
pub fn get_extension(file_name: &str) -> &str {
    let name = get_file_name(file_name);
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[dot + 1..],
        _ => "",
    }
}

/// 最后一个 `/` 或 `\` 之后的部分
pub fn get_file_name(file_path: &str) -> &str {
    match file_path.rfind(['/', '\\']) {
        Some(sep) => &file_path[sep + 1..],
        None => file_path,
    }
}

/// 文件名在第一个点处截断
pub fn get_file_name_without_ext(file_path: &str) -> &str {
    let name = get_file_name(file_path);
    match name.find('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}

/// 最后一个分隔符之前的部分，没有分隔符时为空串
pub fn get_directory_path(file_name: &str) -> &str {
    match file_name.rfind(['/', '\\']) {
        Some(0) => &file_name[..1],
        Some(sep) => &file_name[..sep],
        None => "",
    }
}

/// 目录内容，包括 `.` 与 `..`，按名字排序
pub fn directory_files(dir_path: &str) -> io::Result<Vec<String>> {
    let mut files = vec![".".to_string(), "..".to_string()];
    for entry in fs::read_dir(dir_path)? {
        files.push(entry?.file_name().to_string_lossy().into_owned());
    }
    files.sort();
    Ok(files)
}

/// 修改时间（Unix 秒），失败时为 0
pub fn file_mod_time(file_name: &str) -> i64 {
    fs::metadata(file_name)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

const SLOT_SIZE: u64 = 4;

fn slot_offset(position: i32) -> io::Result<u64> {
    u64::try_from(position)
        .map(|p| p * SLOT_SIZE)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "negative storage position"))
}

/// 在 `position` 槽写入 little-endian i32，文件不足时补零扩展
pub fn storage_save(path: &Path, position: i32, value: i32) -> io::Result<()> {
    let offset = slot_offset(position)?;
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    if file.metadata()?.len() < offset {
        file.set_len(offset)?;
    }
    file.seek(SeekFrom::Start(offset))?;
    file.write_all(&value.to_le_bytes())
}

/// 读取 `position` 槽；文件不存在或长度不足时返回 `None`
pub fn storage_load(path: &Path, position: i32) -> io::Result<Option<i32>> {
    let offset = slot_offset(position)?;
    let mut file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    if file.metadata()?.len() < offset + SLOT_SIZE {
        return Ok(None);
    }
    file.seek(SeekFrom::Start(offset))?;
    let mut buf = [0u8; 4];
    file.read_exact(&mut buf)?;
    Ok(Some(i32::from_le_bytes(buf)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extension_helpers() {
        assert!(is_file_extension("assets/logo.PNG", ".png"));
        assert!(is_file_extension("level.json", ".png;.json"));
        assert!(!is_file_extension("README", ".md"));
        assert_eq!(get_extension("dir/archive.tar.gz"), "gz");
        assert_eq!(get_extension("dir.d/noext"), "");
        assert_eq!(get_extension(".hidden"), "");
    }

    #[test]
    fn test_path_helpers() {
        assert_eq!(get_file_name("a/b\\c.txt"), "c.txt");
        assert_eq!(get_file_name("plain"), "plain");
        assert_eq!(get_file_name_without_ext("dir/archive.tar.gz"), "archive");
        assert_eq!(get_directory_path("dir/sub/file.png"), "dir/sub");
        assert_eq!(get_directory_path("/file.png"), "/");
        assert_eq!(get_directory_path("file.png"), "");
    }

    #[test]
    fn test_directory_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let files = directory_files(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(files, vec![".", "..", "a.txt", "b.txt"]);
        assert!(file_mod_time(dir.path().join("a.txt").to_str().unwrap()) > 0);
        assert_eq!(file_mod_time("/definitely/not/here"), 0);
    }

    #[test]
    fn test_storage_slots() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.data");
        assert_eq!(storage_load(&path, 0).unwrap(), None);

        storage_save(&path, 2, -7).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 12);
        assert_eq!(storage_load(&path, 2).unwrap(), Some(-7));
        assert_eq!(storage_load(&path, 0).unwrap(), Some(0));
        assert_eq!(storage_load(&path, 3).unwrap(), None);

        storage_save(&path, 0, 42).unwrap();
        assert_eq!(storage_load(&path, 0).unwrap(), Some(42));
        assert_eq!(storage_load(&path, 2).unwrap(), Some(-7));
        assert!(storage_save(&path, -1, 1).is_err());
    }
}
