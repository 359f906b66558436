pub const API_BASE: &str = "https://api.themoviedb.org/3";
pub const CDN_BASE: &str = "https://image.tmdb.org/t/p/original";
pub const TMDB_ICON: &str = "https://i.imgur.com/sSE7Usn.png";

/// TMDB search results only carry genre ids, not names.
pub fn movie_genre_name(id: i64) -> Option<&'static str> {
    let name = match id {
        12 => "Adventure",
        14 => "Fantasy",
        16 => "Animation",
        18 => "Drama",
        27 => "Horror",
        28 => "Action",
        35 => "Comedy",
        36 => "History",
        37 => "Western",
        53 => "Thriller",
        80 => "Crime",
        99 => "Documentary",
        878 => "Sci-fi",
        9648 => "Mystery",
        10402 => "Music",
        10749 => "Romance",
        10751 => "Family",
        10752 => "War",
        10770 => "TV Movie",
        _ => return None,
    };
    Some(name)
}

pub fn tv_genre_name(id: i64) -> Option<&'static str> {
    let name = match id {
        16 => "Animation",
        18 => "Drama",
        35 => "Comedy",
        37 => "Western",
        80 => "Crime",
        99 => "Documentary",
        9648 => "Mystery",
        10751 => "Family",
        10759 => "Action/Adventure",
        10762 => "Kids",
        10763 => "News",
        10764 => "Reality",
        10765 => "Sci-fi/Fantasy",
        10766 => "Soap",
        10767 => "Talk",
        10768 => "War/Politics",
        _ => return None,
    };
    Some(name)
}

// https://imdbapi.dev/playground
pub const IMDBAPI_GQL_QUERY: &str = "
query($IMDB_ID: ID!) {
  title(id: $IMDB_ID) {
    id
    primary_title
    rating {
      aggregate_rating
      votes_count
    }
  }
}
";
