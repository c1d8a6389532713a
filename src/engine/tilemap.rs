// Tile grid: map file parsing and tile lookup
//
// Map text format:
//
//   // comment lines start with two slashes
//   <columns> <rows> <tile_width> <tile_height>
//   #a=block.png          tile image declarations, one per code
//   ..........            exactly <rows> grid lines of single-char codes
//
// Comments and declarations are only recognised before the first grid line.
// After it, `/` and `#` are ordinary tile codes. Grid lines shorter than
// <columns> are padded with the empty code.

use std::collections::HashMap;

/// Tile code for passable space
pub const EMPTY_TILE: char = '.';

/// Errors produced while parsing a map file
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map has no size header")]
    MissingHeader,

    #[error("invalid size header on line {line}: {reason}")]
    InvalidHeader { line: usize, reason: String },

    #[error("invalid tile declaration on line {line}: {text}")]
    InvalidTileDeclaration { line: usize, text: String },

    #[error("row {row} is {len} tiles wide, map is {columns} columns")]
    RowTooLong { row: usize, len: usize, columns: usize },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
}

/// Fixed-size grid of single-character tile codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    columns: usize,
    rows: usize,
    tile_width: u32,
    tile_height: u32,
    tiles: Vec<char>,
    tile_images: HashMap<char, String>,
}

impl TileMap {
    /// Build a map directly from grid rows (all codes outside `rows` are empty)
    #[cfg(test)]
    pub fn from_rows(rows: &[&str], tile_width: u32, tile_height: u32) -> Self {
        let columns = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut tiles = Vec::with_capacity(columns * rows.len());
        for row in rows {
            let mut count = 0;
            for code in row.chars() {
                tiles.push(code);
                count += 1;
            }
            tiles.extend(std::iter::repeat(EMPTY_TILE).take(columns - count));
        }

        Self {
            columns,
            rows: rows.len(),
            tile_width,
            tile_height,
            tiles,
            tile_images: HashMap::new(),
        }
    }

    /// Parse the map text format
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines
            .find(|(_, line)| !is_comment(line))
            .ok_or(MapError::MissingHeader)?;
        let (columns, rows, tile_width, tile_height) = parse_header(header_line, header)?;

        let mut tile_images = HashMap::new();
        let mut tiles = Vec::new();
        let mut found_rows = 0;
        let mut in_grid = false;

        for (line_no, line) in lines {
            if !in_grid {
                if is_comment(line) {
                    continue;
                }
                if let Some(decl) = line.strip_prefix('#') {
                    let mut chars = decl.chars();
                    let (Some(code), Some('=')) = (chars.next(), chars.next()) else {
                        return Err(MapError::InvalidTileDeclaration {
                            line: line_no,
                            text: line.to_string(),
                        });
                    };
                    let file = chars.as_str().trim();
                    if file.is_empty() {
                        return Err(MapError::InvalidTileDeclaration {
                            line: line_no,
                            text: line.to_string(),
                        });
                    }
                    tile_images.insert(code, file.to_string());
                    continue;
                }
                in_grid = true;
            }

            let len = line.chars().count();
            if len > columns {
                return Err(MapError::RowTooLong {
                    row: found_rows,
                    len,
                    columns,
                });
            }
            found_rows += 1;
            if found_rows > rows {
                continue;
            }
            tiles.extend(line.chars());
            tiles.extend(std::iter::repeat(EMPTY_TILE).take(columns - len));
        }

        if found_rows != rows {
            return Err(MapError::RowCount {
                expected: rows,
                found: found_rows,
            });
        }

        Ok(Self {
            columns,
            rows,
            tile_width,
            tile_height,
            tiles,
            tile_images,
        })
    }

    /// Tile code at grid coordinate; anything off the grid is empty
    pub fn tile_code_at(&self, col: i32, row: i32) -> char {
        if col < 0 || row < 0 {
            return EMPTY_TILE;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.columns || row >= self.rows {
            return EMPTY_TILE;
        }
        self.tiles[row * self.columns + col]
    }

    /// Check whether the tile at a grid coordinate blocks movement
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        self.tile_code_at(col, row) != EMPTY_TILE
    }

    /// Image file declared for a tile code
    pub fn tile_image(&self, code: char) -> Option<&str> {
        self.tile_images.get(&code).map(String::as_str)
    }

    /// Iterate non-empty tiles as (column, row, code)
    pub fn solid_tiles(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, code)| **code != EMPTY_TILE)
            .map(move |(i, code)| (i % self.columns, i / self.columns, *code))
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn pixel_width(&self) -> u32 {
        self.columns as u32 * self.tile_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.rows as u32 * self.tile_height
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//")
}

fn parse_header(line: usize, header: &str) -> Result<(usize, usize, u32, u32), MapError> {
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(MapError::InvalidHeader {
            line,
            reason: format!("expected 4 numbers, found {}", fields.len()),
        });
    }

    let mut values = [0u32; 4];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = field
            .parse::<u32>()
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| MapError::InvalidHeader {
                line,
                reason: format!("'{}' is not a positive integer", field),
            })?;
    }

    let [columns, rows, tile_width, tile_height] = values;
    let overflow = |what: &str| MapError::InvalidHeader {
        line,
        reason: format!("{} is too large", what),
    };
    columns.checked_mul(rows).ok_or_else(|| overflow("tile count"))?;
    columns
        .checked_mul(tile_width)
        .ok_or_else(|| overflow("pixel width"))?;
    rows.checked_mul(tile_height)
        .ok_or_else(|| overflow("pixel height"))?;

    Ok((columns as usize, rows as usize, tile_width, tile_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = "\
// test level
5 4 32 16
#a=block.png
#b=brick.png

.....
..b
.....
aaaaa
";

    #[test]
    fn test_parse_dimensions() {
        let map = TileMap::parse(LEVEL).unwrap();
        assert_eq!(map.column_count(), 5);
        assert_eq!(map.row_count(), 4);
        assert_eq!(map.tile_width(), 32);
        assert_eq!(map.tile_height(), 16);
        assert_eq!(map.pixel_width(), 160);
        assert_eq!(map.pixel_height(), 64);
    }

    #[test]
    fn test_parse_codes_and_padding() {
        let map = TileMap::parse(LEVEL).unwrap();
        assert_eq!(map.tile_code_at(2, 1), 'b');
        assert_eq!(map.tile_code_at(4, 1), EMPTY_TILE);
        assert_eq!(map.tile_code_at(0, 3), 'a');
        assert!(map.is_solid(4, 3));
    }

    #[test]
    fn test_tile_images() {
        let map = TileMap::parse(LEVEL).unwrap();
        assert_eq!(map.tile_image('a'), Some("block.png"));
        assert_eq!(map.tile_image('z'), None);
    }

    #[test]
    fn test_off_grid_is_empty() {
        let map = TileMap::parse(LEVEL).unwrap();
        assert_eq!(map.tile_code_at(-1, 3), EMPTY_TILE);
        assert_eq!(map.tile_code_at(0, -1), EMPTY_TILE);
        assert_eq!(map.tile_code_at(5, 3), EMPTY_TILE);
        assert_eq!(map.tile_code_at(0, 4), EMPTY_TILE);
    }

    #[test]
    fn test_solid_tiles() {
        let map = TileMap::parse(LEVEL).unwrap();
        let solid: Vec<_> = map.solid_tiles().collect();
        assert_eq!(solid.len(), 6);
        assert!(solid.contains(&(2, 1, 'b')));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(TileMap::parse("// only a comment\n"), Err(MapError::MissingHeader));
    }

    #[test]
    fn test_bad_header() {
        let err = TileMap::parse("5 four 32 32\n.....\n").unwrap_err();
        assert!(matches!(err, MapError::InvalidHeader { line: 1, .. }));

        let err = TileMap::parse("5 4 0 32\n").unwrap_err();
        assert!(matches!(err, MapError::InvalidHeader { .. }));
    }

    #[test]
    fn test_huge_tile_count_is_invalid_header() {
        let err = TileMap::parse("4294967295 4294967295 1 1\n").unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidHeader {
                line: 1,
                reason: "tile count is too large".to_string()
            }
        );
    }

    #[test]
    fn test_huge_pixel_size_is_invalid_header() {
        let err = TileMap::parse("2 1 3000000000 1\n..\n").unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidHeader {
                line: 1,
                reason: "pixel width is too large".to_string()
            }
        );

        let err = TileMap::parse("1 2 1 3000000000\n.\n.\n").unwrap_err();
        assert!(matches!(err, MapError::InvalidHeader { .. }));
    }

    #[test]
    fn test_large_header_without_rows_is_row_count_error() {
        let err = TileMap::parse("60000 60000 1 1\n").unwrap_err();
        assert_eq!(
            err,
            MapError::RowCount {
                expected: 60000,
                found: 0
            }
        );
    }

    #[test]
    fn test_comment_and_declaration_markers_are_codes_inside_grid() {
        let map = TileMap::parse("3 2 8 8\n#a=a.png\n// before grid\n.#.\n//.\n").unwrap();
        assert_eq!(map.row_count(), 2);
        assert_eq!(map.tile_code_at(1, 0), '#');
        assert_eq!(map.tile_code_at(0, 1), '/');
        assert_eq!(map.tile_code_at(1, 1), '/');
        assert_eq!(map.tile_image('a'), Some("a.png"));
        assert_eq!(map.tile_image('.'), None);
    }

    #[test]
    fn test_row_too_long() {
        let err = TileMap::parse("3 1 32 32\n....\n").unwrap_err();
        assert_eq!(
            err,
            MapError::RowTooLong {
                row: 0,
                len: 4,
                columns: 3
            }
        );
    }

    #[test]
    fn test_row_count_mismatch() {
        let err = TileMap::parse("3 3 32 32\n...\n...\n").unwrap_err();
        assert_eq!(err, MapError::RowCount { expected: 3, found: 2 });
    }

    #[test]
    fn test_bad_tile_declaration() {
        let err = TileMap::parse("3 1 32 32\n#a\n...\n").unwrap_err();
        assert!(matches!(err, MapError::InvalidTileDeclaration { line: 2, .. }));
    }

    #[test]
    fn test_from_rows() {
        let map = TileMap::from_rows(&["..", "a"], 10, 10);
        assert_eq!(map.column_count(), 2);
        assert_eq!(map.tile_code_at(0, 1), 'a');
        assert_eq!(map.tile_code_at(1, 1), EMPTY_TILE);
    }

    #[test]
    fn test_parsing_twice_is_identical() {
        assert_eq!(TileMap::parse(LEVEL).unwrap(), TileMap::parse(LEVEL).unwrap());
    }
}
