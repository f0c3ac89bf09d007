//! Static method registry for the Last.fm web service.
//!
//! Each [`Entity`] groups a set of REST methods. Its [`EntityDefinition`] declares
//! which methods are read with GET, which are written with POST and which need a
//! signed, authenticated request. Dispatch is a lookup in these tables.

use crate::inflector::camelize;
use crate::types::{CallContext, MethodSpec, Params, Verb};
use crate::{LastFmError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry data for one entity.
#[derive(Debug, PartialEq, Eq)]
pub struct EntityDefinition {
    pub name: &'static str,
    pub read_methods: &'static [&'static str],
    pub write_methods: &'static [&'static str],
    pub auth_required: &'static [&'static str],
}

/// Logical groups of remote methods known to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Album,
    Artist,
    Auth,
    Event,
    Geo,
    Group,
    Library,
    Playlist,
    Tag,
    Tasteometer,
    Track,
    User,
    Venue,
}

impl Entity {
    pub const ALL: [Entity; 13] = [
        Entity::Album,
        Entity::Artist,
        Entity::Auth,
        Entity::Event,
        Entity::Geo,
        Entity::Group,
        Entity::Library,
        Entity::Playlist,
        Entity::Tag,
        Entity::Tasteometer,
        Entity::Track,
        Entity::User,
        Entity::Venue,
    ];

    pub fn definition(self) -> &'static EntityDefinition {
        match self {
            Entity::Album => &ALBUM,
            Entity::Artist => &ARTIST,
            Entity::Auth => &AUTH,
            Entity::Event => &EVENT,
            Entity::Geo => &GEO,
            Entity::Group => &GROUP,
            Entity::Library => &LIBRARY,
            Entity::Playlist => &PLAYLIST,
            Entity::Tag => &TAG,
            Entity::Tasteometer => &TASTEOMETER,
            Entity::Track => &TRACK,
            Entity::User => &USER,
            Entity::Venue => &VENUE,
        }
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Look up an entity by its declared name (`Album`, `Tasteometer`, ...).
    pub fn from_name(name: &str) -> Option<Entity> {
        Entity::ALL.into_iter().find(|entity| entity.name() == name)
    }

    /// Resolve the name a caller used (`album`, `user`, ...) to an entity.
    ///
    /// The called name is camelized before lookup, so `album` and `Album` both
    /// resolve while `albums` does not.
    pub fn from_call_name(name: &str) -> Result<Entity> {
        let camelized = camelize(name);
        Entity::from_name(&camelized)
            .ok_or_else(|| LastFmError::UnknownEntity(name.to_string()))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl EntityDefinition {
    /// Determine verb and auth requirement for `method`.
    ///
    /// Write methods are checked first, so a name declared in both sets is
    /// sent as POST.
    pub fn classify(&self, method: &str) -> Result<MethodSpec> {
        let verb = if declares(self.write_methods, method) {
            Verb::Post
        } else if declares(self.read_methods, method) {
            Verb::Get
        } else {
            return Err(LastFmError::UnknownMethod {
                entity: self.name.to_string(),
                method: method.to_string(),
            });
        };

        Ok(MethodSpec {
            verb,
            requires_auth: declares(self.auth_required, method),
        })
    }

    /// The dotted REST name, e.g. `album.search` or `track.addTags`.
    pub fn rest_method(&self, method: &str) -> String {
        format!("{}.{}", self.name.to_lowercase(), method)
    }

    /// List the methods this entity declares.
    ///
    /// `Some(true)` keeps only methods that require auth, `Some(false)` only
    /// those that don't, `None` returns every read and write method.
    pub fn list_methods(&self, needs_auth: Option<bool>) -> Vec<&'static str> {
        self.read_methods
            .iter()
            .chain(self.write_methods.iter())
            .copied()
            .filter(|method| match needs_auth {
                Some(wanted) => self.auth_required.contains(method) == wanted,
                None => true,
            })
            .collect()
    }

    /// Validate `method` and capture everything needed to build the request.
    pub fn prepare_call(&self, method: &str, params: Params) -> Result<CallContext> {
        let spec = self.classify(method)?;
        Ok(CallContext {
            entity: self.name,
            method: method.to_string(),
            rest_method: self.rest_method(method),
            verb: spec.verb,
            requires_auth: spec.requires_auth,
            params,
        })
    }

    /// Read and write sets are disjoint and every auth method is declared.
    pub fn is_consistent(&self) -> bool {
        let disjoint = self
            .read_methods
            .iter()
            .all(|method| !self.write_methods.contains(method));
        let auth_declared = self.auth_required.iter().all(|method| {
            self.read_methods.contains(method) || self.write_methods.contains(method)
        });
        disjoint && auth_declared
    }
}

fn declares(methods: &[&str], method: &str) -> bool {
    methods.iter().any(|declared| *declared == method)
}

static ALBUM: EntityDefinition = EntityDefinition {
    name: "Album",
    read_methods: &["getInfo", "getTags", "search"],
    write_methods: &["addTags", "removeTag"],
    auth_required: &["addTags", "removeTag"],
};

static ARTIST: EntityDefinition = EntityDefinition {
    name: "Artist",
    read_methods: &[
        "getEvents",
        "getInfo",
        "getShouts",
        "getSimilar",
        "getTags",
        "getTopAlbums",
        "getTopFans",
        "getTopTags",
        "getTopTracks",
        "search",
    ],
    write_methods: &["addTags", "removeTag", "share"],
    auth_required: &["addTags", "removeTag", "share"],
};

// Every Auth method is signed; the token stands in for the session key.
static AUTH: EntityDefinition = EntityDefinition {
    name: "Auth",
    read_methods: &["getMobileSession", "getSession", "getToken", "getWebSession"],
    write_methods: &[],
    auth_required: &["getMobileSession", "getSession", "getToken", "getWebSession"],
};

static EVENT: EntityDefinition = EntityDefinition {
    name: "Event",
    read_methods: &["getInfo", "getShouts"],
    write_methods: &["attend", "share"],
    auth_required: &["attend", "share"],
};

static GEO: EntityDefinition = EntityDefinition {
    name: "Geo",
    read_methods: &["getEvents", "getTopArtists", "getTopTracks"],
    write_methods: &[],
    auth_required: &[],
};

static GROUP: EntityDefinition = EntityDefinition {
    name: "Group",
    read_methods: &[
        "getMembers",
        "getWeeklyAlbumChart",
        "getWeeklyArtistChart",
        "getWeeklyChartList",
        "getWeeklyTrackChart",
    ],
    write_methods: &[],
    auth_required: &[],
};

static LIBRARY: EntityDefinition = EntityDefinition {
    name: "Library",
    read_methods: &["getAlbums", "getArtists", "getTracks"],
    write_methods: &["addAlbum", "addArtist", "addTrack"],
    auth_required: &["addAlbum", "addArtist", "addTrack"],
};

static PLAYLIST: EntityDefinition = EntityDefinition {
    name: "Playlist",
    read_methods: &["fetch"],
    write_methods: &["create", "addTrack"],
    auth_required: &["create", "addTrack"],
};

static TAG: EntityDefinition = EntityDefinition {
    name: "Tag",
    read_methods: &[
        "getSimilar",
        "getTopAlbums",
        "getTopArtists",
        "getTopTags",
        "getTopTracks",
        "getWeeklyArtistChart",
        "getWeeklyChartList",
        "search",
    ],
    write_methods: &[],
    auth_required: &[],
};

static TASTEOMETER: EntityDefinition = EntityDefinition {
    name: "Tasteometer",
    read_methods: &["compare"],
    write_methods: &[],
    auth_required: &[],
};

static TRACK: EntityDefinition = EntityDefinition {
    name: "Track",
    read_methods: &[
        "getInfo",
        "getSimilar",
        "getTags",
        "getTopFans",
        "getTopTags",
        "search",
    ],
    write_methods: &["addTags", "ban", "love", "removeTag", "share"],
    auth_required: &["addTags", "ban", "love", "removeTag", "share"],
};

static USER: EntityDefinition = EntityDefinition {
    name: "User",
    read_methods: &[
        "getEvents",
        "getFriends",
        "getInfo",
        "getLovedTracks",
        "getNeighbours",
        "getPastEvents",
        "getPlaylists",
        "getRecentTracks",
        "getRecommendedArtists",
        "getRecommendedEvents",
        "getShouts",
        "getTopAlbums",
        "getTopArtists",
        "getTopTags",
        "getTopTracks",
        "getWeeklyAlbumChart",
        "getWeeklyArtistChart",
        "getWeeklyChartList",
        "getWeeklyTrackChart",
    ],
    write_methods: &[],
    auth_required: &[],
};

static VENUE: EntityDefinition = EntityDefinition {
    name: "Venue",
    read_methods: &["getEvents", "getPastEvents", "search"],
    write_methods: &[],
    auth_required: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_definitions_consistent() {
        for entity in Entity::ALL {
            assert!(
                entity.definition().is_consistent(),
                "{entity} declares overlapping or undeclared methods"
            );
        }
    }

    #[test]
    fn test_classify_every_declared_method() {
        for entity in Entity::ALL {
            let def = entity.definition();
            for method in def.read_methods {
                let spec = def.classify(method).unwrap();
                assert_eq!(spec.verb, Verb::Get, "{entity}.{method}");
                assert_eq!(spec.requires_auth, def.auth_required.contains(method));
            }
            for method in def.write_methods {
                let spec = def.classify(method).unwrap();
                assert_eq!(spec.verb, Verb::Post, "{entity}.{method}");
                assert_eq!(spec.requires_auth, def.auth_required.contains(method));
            }
        }
    }

    #[test]
    fn test_classify_unknown_method() {
        let err = Entity::Album.definition().classify("love").unwrap_err();
        match err {
            LastFmError::UnknownMethod { entity, method } => {
                assert_eq!(entity, "Album");
                assert_eq!(method, "love");
            }
            other => panic!("Expected UnknownMethod, got: {other:?}"),
        }
    }

    #[test]
    fn test_write_takes_precedence_over_read() {
        let overlapping = EntityDefinition {
            name: "Broken",
            read_methods: &["share"],
            write_methods: &["share"],
            auth_required: &[],
        };
        assert!(!overlapping.is_consistent());
        assert_eq!(overlapping.classify("share").unwrap().verb, Verb::Post);
    }

    #[test]
    fn test_auth_methods_are_signed_reads() {
        let spec = Entity::Auth.definition().classify("getSession").unwrap();
        assert_eq!(spec.verb, Verb::Get);
        assert!(spec.requires_auth);
    }

    #[test]
    fn test_list_methods_filters() {
        let track = Entity::Track.definition();
        assert_eq!(track.list_methods(None).len(), 11);
        assert_eq!(
            track.list_methods(Some(true)),
            vec!["addTags", "ban", "love", "removeTag", "share"]
        );
        assert_eq!(
            track.list_methods(Some(false)),
            vec!["getInfo", "getSimilar", "getTags", "getTopFans", "getTopTags", "search"]
        );
        assert!(Entity::Geo.definition().list_methods(Some(true)).is_empty());
    }

    #[test]
    fn test_rest_method_lowercases_entity_only() {
        assert_eq!(Entity::Album.definition().rest_method("search"), "album.search");
        assert_eq!(
            Entity::Track.definition().rest_method("addTags"),
            "track.addTags"
        );
    }

    #[test]
    fn test_from_call_name() {
        assert_eq!(Entity::from_call_name("album").unwrap(), Entity::Album);
        assert_eq!(Entity::from_call_name("Venue").unwrap(), Entity::Venue);
        assert_eq!(
            Entity::from_call_name("tasteometer").unwrap(),
            Entity::Tasteometer
        );
        assert!(matches!(
            Entity::from_call_name("albums"),
            Err(LastFmError::UnknownEntity(name)) if name == "albums"
        ));
    }

    #[test]
    fn test_prepare_call() {
        let ctx = Entity::Track
            .definition()
            .prepare_call("love", vec![("track".into(), "Creep".into())])
            .unwrap();
        assert_eq!(ctx.rest_method, "track.love");
        assert_eq!(ctx.verb, Verb::Post);
        assert!(ctx.requires_auth);
        assert!(!ctx.is_auth_entity());
    }
}
