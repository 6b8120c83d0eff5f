use crate::core::bounds::Bounds;
use crate::core::geo::{tile_to_pixel, TileCoord};
use crate::{MapError, Result};
use std::path::Path;

/// Discovers the set of tiles available on disk for one zoom level.
///
/// The tile store is laid out as `<root>/<zoom>/<x>/<y>.<ext>`: one
/// directory per tile column, one file per tile row. Directory and file
/// names that do not parse as integers are skipped silently; an image
/// extension on the `y` files is expected but not checked here.
///
/// Fails with [`MapError::EmptyTileSet`] when the scan yields no tiles,
/// which also covers a missing or unreadable zoom directory.
pub fn discover(root: &Path, zoom: u8) -> Result<Vec<TileCoord>> {
    let level_path = root.join(zoom.to_string());
    let mut tiles = Vec::new();

    if let Ok(columns) = std::fs::read_dir(&level_path) {
        for column in columns.flatten() {
            if !column.path().is_dir() {
                continue;
            }
            let x = match parse_name(&column.file_name()) {
                Some(x) => x,
                None => {
                    log::debug!("skipping non-numeric tile column {:?}", column.file_name());
                    continue;
                }
            };

            for row in std::fs::read_dir(column.path())?.flatten() {
                if !row.path().is_file() {
                    continue;
                }
                match parse_stem(&row.path()) {
                    Some(y) => tiles.push(TileCoord::new(x, y, zoom)),
                    None => {
                        log::debug!("skipping non-numeric tile file {:?}", row.file_name());
                    }
                }
            }
        }
    }

    if tiles.is_empty() {
        return Err(MapError::EmptyTileSet {
            zoom,
            path: level_path,
        });
    }

    log::info!(
        "discovered {} tiles at zoom {} under {}",
        tiles.len(),
        zoom,
        root.display()
    );
    Ok(tiles)
}

/// Computes the scene rectangle enclosing every tile in the set.
///
/// Uses true min/max over the set (discovery order is not guaranteed); the
/// bottom-right corner comes from tile `(max_x + 1, max_y + 1)` so the last
/// row and column are fully included.
pub fn bounding_scene_rect(tiles: &[TileCoord]) -> Bounds {
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;

    for tile in tiles {
        min_x = min_x.min(tile.x);
        min_y = min_y.min(tile.y);
        max_x = max_x.max(tile.x);
        max_y = max_y.max(tile.y);
    }

    let zoom = tiles.first().map(|t| t.z).unwrap_or(0);
    let top_left = tile_to_pixel(TileCoord::new(min_x, min_y, zoom));
    let bottom_right = tile_to_pixel(TileCoord::new(max_x + 1, max_y + 1, zoom));

    Bounds::new(top_left, bottom_right)
}

fn parse_name(name: &std::ffi::OsStr) -> Option<i32> {
    name.to_str()?.parse().ok()
}

fn parse_stem(path: &Path) -> Option<i32> {
    path.file_stem()?.to_str()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;
    use std::fs;

    fn make_tile_store(tiles: &[(i32, i32)], zoom: u8) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (x, y) in tiles {
            let col = dir.path().join(zoom.to_string()).join(x.to_string());
            fs::create_dir_all(&col).unwrap();
            fs::write(col.join(format!("{}.jpg", y)), b"img").unwrap();
        }
        dir
    }

    #[test]
    fn test_discover_finds_all_tiles() {
        let dir = make_tile_store(&[(3, 5), (3, 6), (4, 5)], 12);
        let mut tiles = discover(dir.path(), 12).unwrap();
        tiles.sort_by_key(|t| (t.x, t.y));
        assert_eq!(
            tiles,
            vec![
                TileCoord::new(3, 5, 12),
                TileCoord::new(3, 6, 12),
                TileCoord::new(4, 5, 12),
            ]
        );
    }

    #[test]
    fn test_discover_ignores_non_numeric_names() {
        let dir = make_tile_store(&[(1, 1)], 9);
        let level = dir.path().join("9");
        fs::create_dir_all(level.join("thumbs")).unwrap();
        fs::write(level.join("thumbs").join("index.html"), b"x").unwrap();
        fs::write(level.join("1").join("notes.txt"), b"x").unwrap();

        let tiles = discover(dir.path(), 9).unwrap();
        assert_eq!(tiles, vec![TileCoord::new(1, 1, 9)]);
    }

    #[test]
    fn test_discover_empty_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(dir.path(), 17).unwrap_err();
        assert!(matches!(err, MapError::EmptyTileSet { zoom: 17, .. }));
    }

    #[test]
    fn test_bounding_scene_rect_uses_min_max() {
        // Deliberately unordered set
        let tiles = vec![
            TileCoord::new(1, 0, 17),
            TileCoord::new(0, 1, 17),
            TileCoord::new(0, 0, 17),
        ];
        let rect = bounding_scene_rect(&tiles);
        assert_eq!(rect.min, Point::new(0.0, 0.0));
        assert_eq!(rect.max, Point::new(512.0, 512.0));
        // Tile-derived bounds are whole tiles
        assert_eq!(rect.width() % 256.0, 0.0);
        assert_eq!(rect.height() % 256.0, 0.0);
    }
}
