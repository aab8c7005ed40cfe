use std::fmt;

/// State of a single cell in the maze grid.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridCell {
    #[default]
    Wall,
    Path,
}

impl GridCell {
    pub fn is_path(self) -> bool {
        self == GridCell::Path
    }

    pub fn is_wall(self) -> bool {
        self == GridCell::Wall
    }
}

/// Plain text form used when dumping a maze to stdout.
impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            GridCell::Wall => '#',
            GridCell::Path => ' ',
        };
        write!(f, "{}", symbol)
    }
}
