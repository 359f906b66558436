use poise::serenity_prelude::{
    self as serenity, Colour, CreateEmbed, CreateEmbedFooter, Mentionable,
};
use rand::Rng;

use crate::embeds::random_colour;
use crate::{Context, Error};

const NO_U: &str = "**Ｎ Ｏ   Ｕ**";

const BAKA: &[&str] = &[
    "https://i.imgur.com/z28gPcV.gif",
    "https://i.imgur.com/K9EZHkL.gif",
    "https://i.imgur.com/4XGgOmN.gif",
    "https://i.imgur.com/iU1hzQq.gif",
    "https://i.imgur.com/P9XykZD.gif",
];
const BULLY: &[&str] = &[
    "https://i.imgur.com/GrzXTPR.gif",
    "https://i.imgur.com/vyVJzCm.gif",
    "https://i.imgur.com/dmbJUJm.gif",
    "https://i.imgur.com/0kkSkkc.gif",
];
const CRY: &[&str] = &[
    "https://i.imgur.com/TJPnjZl.gif",
    "https://i.imgur.com/dFGjnVa.gif",
    "https://i.imgur.com/2Ccl8bZ.gif",
    "https://i.imgur.com/6bnvVst.gif",
    "https://i.imgur.com/zXp0qFQ.gif",
];
const CUDDLE: &[&str] = &[
    "https://i.imgur.com/9s5vZ4j.gif",
    "https://i.imgur.com/kjTeSGK.gif",
    "https://i.imgur.com/CuRbLRT.gif",
    "https://i.imgur.com/l8kNjbV.gif",
];
const FEED: &[&str] = &[
    "https://i.imgur.com/vLoCySh.gif",
    "https://i.imgur.com/JINnVCo.gif",
    "https://i.imgur.com/tzCfc4h.gif",
    "https://i.imgur.com/NHFt9hs.gif",
];
const HIGHFIVE: &[&str] = &[
    "https://i.imgur.com/aBtPrMv.gif",
    "https://i.imgur.com/pACmtAH.gif",
    "https://i.imgur.com/M6tUWLS.gif",
    "https://i.imgur.com/jPdiqgX.gif",
];
const HUG: &[&str] = &[
    "https://i.imgur.com/is3ZVkf.gif",
    "https://i.imgur.com/1zdQzVN.gif",
    "https://i.imgur.com/gBoDCLV.gif",
    "https://i.imgur.com/4oLIrwj.gif",
    "https://i.imgur.com/6qYOUQF.gif",
];
const KISS: &[&str] = &[
    "https://i.imgur.com/9EVvPNK.gif",
    "https://i.imgur.com/nHeUmKn.gif",
    "https://i.imgur.com/TcBZLoY.gif",
    "https://i.imgur.com/IhWtHyh.gif",
];
const NOM: &[&str] = &[
    "https://i.imgur.com/Moinjdh.gif",
    "https://i.imgur.com/f4CVlPP.gif",
    "https://i.imgur.com/02c2CHY.gif",
    "https://i.imgur.com/D0qEfFh.gif",
];
const PAT: &[&str] = &[
    "https://i.imgur.com/2lacG7l.gif",
    "https://i.imgur.com/UWbKpx8.gif",
    "https://i.imgur.com/4ssddEQ.gif",
    "https://i.imgur.com/LUypjw3.gif",
    "https://i.imgur.com/3WKKBMh.gif",
];
const POKE: &[&str] = &[
    "https://i.imgur.com/sWiHTGr.gif",
    "https://i.imgur.com/nXQbYA5.gif",
    "https://i.imgur.com/7JUIcnd.gif",
    "https://i.imgur.com/byNqFTT.gif",
];
const PUNCH: &[&str] = &[
    "https://i.imgur.com/PQvuyXH.gif",
    "https://i.imgur.com/05tVmfQ.gif",
    "https://i.imgur.com/FSY1NhR.gif",
    "https://i.imgur.com/lADHgkQ.gif",
];
const SLAP: &[&str] = &[
    "https://i.imgur.com/oOthRrB.gif",
    "https://i.imgur.com/dOFNyF0.gif",
    "https://i.imgur.com/fm2YDTu.gif",
    "https://i.imgur.com/LMEzyfK.gif",
];
const SMUG: &[&str] = &[
    "https://i.imgur.com/zhowUIQ.gif",
    "https://i.imgur.com/KSFEhmw.gif",
    "https://i.imgur.com/EITSHAH.gif",
    "https://i.imgur.com/sVtOyYn.gif",
];
const TICKLE: &[&str] = &[
    "https://i.imgur.com/fnvHcVk.gif",
    "https://i.imgur.com/mthjKbL.gif",
    "https://i.imgur.com/4fiMRHp.gif",
    "https://i.imgur.com/ErWQVjb.gif",
];

const CRY_STRINGS: &[&str] = &[
    "is crying rn, someone cheer them up! 😭",
    "bursts into tears...",
    "cries a whole river. 😢",
    "feels like crying today.",
];
const PUNCH_STRINGS: &[&str] = &[
    "throws a punch at",
    "ONE PUNCHES",
    "lands an uppercut on",
    "falcon punches",
];
const RECIPES: &[&str] = &[
    "a big bowl of ramen",
    "a jar of cookies",
    "three whole pizzas",
    "some onigiri",
    "a plate of spaghetti",
    "a mountain of pancakes",
];

fn pick(options: &'static [&'static str]) -> &'static str {
    options[rand::thread_rng().gen_range(0..options.len())]
}

fn bump(ctx: &Context<'_>, target: Option<serenity::UserId>, action: &str) -> Result<(i64, i64), Error> {
    let guild_id = ctx.guild_id().map(|g| g.get()).unwrap_or_default();
    let counts = ctx.data().db.bump_roleplay(
        guild_id,
        ctx.author().id.get(),
        target.map(|id| id.get()),
        action,
    )?;
    Ok(counts)
}

fn member_colour(ctx: &Context<'_>, member: &serenity::Member) -> Colour {
    member
        .colour(ctx.serenity_context())
        .unwrap_or_else(|| Colour::new(random_colour()))
}

async fn send_gif(
    ctx: Context<'_>,
    colour: Colour,
    content: Option<String>,
    description: Option<String>,
    gif: &str,
    footer: String,
) -> Result<(), Error> {
    let mut embed = CreateEmbed::new()
        .colour(colour)
        .image(gif)
        .footer(CreateEmbedFooter::new(footer));
    if let Some(description) = description {
        embed = embed.description(description);
    }
    let mut reply = poise::CreateReply::default().embed(embed);
    if let Some(content) = content {
        reply = reply.content(content);
    }
    ctx.send(reply).await?;
    Ok(())
}

fn is_me(ctx: &Context<'_>, member: &serenity::Member) -> bool {
    member.user.id == ctx.framework().bot_id
}

/// "I" when the bot is on the receiving end, the member's name otherwise.
fn receiver_name(ctx: &Context<'_>, member: &serenity::Member) -> String {
    if is_me(ctx, member) {
        "I".to_owned()
    } else {
        member.user.name.clone()
    }
}

/// Call someone a BAKA with a GIF reaction!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn baka(
    ctx: Context<'_>,
    #[description = "Who is the baka?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if is_me(&ctx, &member) {
        ctx.say(NO_U).await?;
        return Ok(());
    }
    if member.user.id == author.id {
        ctx.say(format!("**{}**, you really are BAKA. Stupid!! 💩", author.name))
            .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "baka")?;
    let content = format!(
        "> _**{}** calls {} a BAKA bahahahahaha!!!_",
        author.name,
        member.mention()
    );
    let footer = format!(
        "{} used baka: {sent} times so far.\n{} got called a BAKA: {received} times so far.",
        author.name, member.user.name
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, pick(BAKA), footer).await
}

/// Bully someone in this server with a funny GIF!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 60)]
pub async fn bully(
    ctx: Context<'_>,
    #[description = "Who do you want to bully?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if is_me(&ctx, &member) {
        ctx.say(NO_U).await?;
        return Ok(());
    }
    if member.user.id == author.id {
        ctx.say(format!(
            "{} Self bullying doesn't make sense. Stop it, get some help.",
            author.mention()
        ))
        .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "bully")?;
    let content = format!("> _**{}** bullies {}_ 🤡", author.name, member.mention());
    let footer = format!(
        "{} bullied others: {sent} times so far.\n{} got bullied: {received} times so far.",
        author.name, member.user.name
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, pick(BULLY), footer).await
}

/// Let others know that you feel like crying or just wanna cry
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn cry(ctx: Context<'_>) -> Result<(), Error> {
    let author = ctx.author();
    let (sent, _) = bump(&ctx, None, "cry")?;
    let description = format!("{} {}", author.mention(), pick(CRY_STRINGS));
    let footer = format!("{} has cried {sent} times in this server so far.", author.name);
    send_gif(
        ctx,
        Colour::new(random_colour()),
        None,
        Some(description),
        pick(CRY),
        footer,
    )
    .await
}

/// Cuddle with a server member!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn cuddle(
    ctx: Context<'_>,
    #[description = "Who do you want to cuddle?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if member.user.id == author.id {
        ctx.say(format!(
            "{} According to all known laws of roleplay, there is no way you can \
             cuddle yourself! Go cuddle with someone... or a pillow, if you're \
             lonely like me. 😔",
            author.mention()
        ))
        .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "cuddle")?;
    let content = if is_me(&ctx, &member) {
        format!("Awww thanks for cuddles, **{}**! Very kind of you. 😳", author.name)
    } else {
        format!("> _**{}** cuddles_ {}", author.name, member.mention())
    };
    let footer = format!(
        "{} sent: {sent} cuddles so far.\n{} received: {received} cuddles so far.",
        author.name,
        receiver_name(&ctx, &member)
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, pick(CUDDLE), footer).await
}

/// Feed someone from this server virtually!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn feed(
    ctx: Context<'_>,
    #[description = "Who do you want to feed?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if member.user.id == author.id {
        ctx.say(format!("_{} eats **{}**!_", author.mention(), pick(RECIPES)))
            .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "feed")?;
    let content = if is_me(&ctx, &member) {
        format!("OWO! Thanks for yummy food..., **{}**! ❤️", author.name)
    } else {
        format!(
            "> _**{}** feeds {} some delicious food!_",
            author.name,
            member.mention()
        )
    };
    let footer = format!(
        "{} has fed others: {sent} times so far.\n{} received some food: {received} times so far.",
        author.name,
        receiver_name(&ctx, &member)
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, pick(FEED), footer).await
}

/// High-fives a user!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn highfive(
    ctx: Context<'_>,
    #[description = "Who gets the high-five?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if member.user.id == author.id {
        ctx.say(format!(
            "_{} high-fives themselves in mirror, I guess?_",
            author.mention()
        ))
        .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "highfive")?;
    let (content, gif) = if is_me(&ctx, &member) {
        (
            format!("_high-fives back to **{}**_ 👀", author.name),
            "https://i.imgur.com/hQPCYUJ.gif",
        )
    } else {
        (
            format!("> _**{}** high fives_ {}", author.name, member.mention()),
            pick(HIGHFIVE),
        )
    };
    let footer = format!(
        "{} sent: {sent} high-fives so far.\n{} received: {received} high-fives so far.",
        author.name,
        receiver_name(&ctx, &member)
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, gif, footer).await
}

/// Hug a user virtually on Discord!
#[poise::command(slash_command, prefix_command, guild_only, aliases("hugs"), user_cooldown = 10)]
pub async fn hug(
    ctx: Context<'_>,
    #[description = "Who do you want to hug?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if member.user.id == author.id {
        ctx.say(format!(
            "{} One dOEs NOt SiMplY hUg THeIR oWn sELF!!!!!",
            author.mention()
        ))
        .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "hug")?;
    let content = if is_me(&ctx, &member) {
        format!(
            "Awwww thanks! So nice of you! _hugs **{}** back_ 🤗",
            author.name
        )
    } else {
        format!("> _**{}** hugs_ {} 🤗", author.name, member.mention())
    };
    let footer = format!(
        "{} gave: {sent} hugs so far.\n{} received: {received} hugs so far!",
        author.name,
        receiver_name(&ctx, &member)
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, pick(HUG), footer).await
}

/// Kiss a user! Only allowed in NSFW channels
#[poise::command(slash_command, prefix_command, guild_only, nsfw_only, user_cooldown = 10)]
pub async fn kiss(
    ctx: Context<'_>,
    #[description = "Who do you want to kiss?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if member.user.id == author.id {
        ctx.say(format!(
            "Poggers **{}**, you just kissed yourself! LOL!!! 💋",
            author.name
        ))
        .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "kiss")?;
    let content = if is_me(&ctx, &member) {
        format!("Awwww so nice of you! _kisses **{}** back!_ 😘 🥰", author.name)
    } else {
        format!("> _**{}** kisses_ {} 😘 🥰", author.name, member.mention())
    };
    let footer = format!(
        "{} sent: {sent} kisses so far.\n{} received: {received} kisses so far!",
        author.name,
        receiver_name(&ctx, &member)
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, pick(KISS), footer).await
}

/// Try to nom/bite a server member!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn nom(
    ctx: Context<'_>,
    #[description = "Who do you want to nom?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if is_me(&ctx, &member) {
        ctx.say("**OH NO!** _runs away_").await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "nom")?;
    let content = if member.user.id == author.id {
        format!("Waaaaaa! **{}**, You bit yourself! Whyyyy?? 😭", author.name)
    } else {
        format!("> _**{}** casually noms_ {} 😈", author.name, member.mention())
    };
    let footer = format!(
        "{} nom'd: {sent} times so far.\n{} received: {received} noms so far!",
        author.name, member.user.name
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, pick(NOM), footer).await
}

/// Pat a server member with a wholesome GIF!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn pat(
    ctx: Context<'_>,
    #[description = "Who deserves the pats?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if member.user.id == author.id {
        ctx.say(format!(
            "{} _pats themselves, I guess? **yay**_ 🎉",
            author.mention()
        ))
        .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "pat")?;
    let content = if is_me(&ctx, &member) {
        format!("Wowie! Thanks **{}** for giving me pats. 😳 😘", author.name)
    } else {
        format!("> _**{}** pats_ {}", author.name, member.mention())
    };
    let footer = format!(
        "{} gave: {sent} pats so far.\n{} received: {received} pats so far!",
        author.name,
        receiver_name(&ctx, &member)
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, pick(PAT), footer).await
}

/// Poke your Discord friends or strangers!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn poke(
    ctx: Context<'_>,
    #[description = "Who do you want to poke?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if member.user.id == author.id {
        ctx.say(format!("**{}** wants to play self poke huh?!", author.name))
            .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "poke")?;
    let content = if is_me(&ctx, &member) {
        format!("Awwww! Hey there. _pokes **{}** back!_", author.name)
    } else {
        format!("> _**{}** casually pokes_ {}", author.name, member.mention())
    };
    let footer = format!(
        "{} gave: {sent} pokes so far.\n{} received: {received} pokes so far!",
        author.name,
        receiver_name(&ctx, &member)
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, pick(POKE), footer).await
}

/// Punch someone on Discord with a GIF reaction!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn punch(
    ctx: Context<'_>,
    #[description = "Who deserves the punch?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if is_me(&ctx, &member) {
        let content = format!(
            "{} tried to punch a bot but failed miserably,\nand they actually \
             punched themselves instead.\nHow disappointing LMFAO! 😂 😂 😂",
            author.mention()
        );
        let embed = CreateEmbed::new()
            .colour(Colour::new(random_colour()))
            .image("https://i.imgur.com/iVgOijZ.gif");
        ctx.send(poise::CreateReply::default().content(content).embed(embed))
            .await?;
        return Ok(());
    }
    if member.user.id == author.id {
        ctx.say(format!(
            "I uh ..... **{}**, self harm doesn't sound so fun. Stop it, get some help.",
            author.name
        ))
        .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "punch")?;
    let content = format!(
        "> _**{}** {}_ {}",
        author.name,
        pick(PUNCH_STRINGS),
        member.mention()
    );
    let footer = format!(
        "{} sent: {sent} punches so far.\n{} received: {received} punches so far!",
        author.name, member.user.name
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, pick(PUNCH), footer).await
}

/// Slap a server member!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn slap(
    ctx: Context<'_>,
    #[description = "Who deserves the slap?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if is_me(&ctx, &member) {
        ctx.say(NO_U).await?;
        return Ok(());
    }
    if member.user.id == author.id {
        ctx.say(format!(
            "{} Don't slap yourself, you're precious!",
            author.mention()
        ))
        .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "slap")?;
    let content = format!("> _**{}** slaps_ {}", author.name, member.mention());
    let footer = format!(
        "{} gave: {sent} slaps so far.\n{} received: {received} slaps so far!",
        author.name, member.user.name
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, pick(SLAP), footer).await
}

/// Show everyone your smug face!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn smug(ctx: Context<'_>) -> Result<(), Error> {
    let author = ctx.author();
    let (sent, _) = bump(&ctx, None, "smug")?;
    let content = format!("> _**{}** smugs at **@\u{200b}someone**_ 😏", author.name);
    let footer = format!(
        "{} has smugged {sent} times in this server so far.",
        author.name
    );
    send_gif(
        ctx,
        Colour::new(random_colour()),
        Some(content),
        None,
        pick(SMUG),
        footer,
    )
    .await
}

/// Try to tickle a server member!
#[poise::command(slash_command, prefix_command, guild_only, user_cooldown = 10)]
pub async fn tickle(
    ctx: Context<'_>,
    #[description = "Who do you want to tickle?"] member: serenity::Member,
) -> Result<(), Error> {
    let author = ctx.author();
    if member.user.id == author.id {
        ctx.say(format!(
            "{} tickling yourself is boring! Tickling others is more fun though, right? 😏",
            author.mention()
        ))
        .await?;
        return Ok(());
    }
    let (sent, received) = bump(&ctx, Some(member.user.id), "tickle")?;
    let (content, gif) = if is_me(&ctx, &member) {
        (
            format!("_Wow, nice tickling skills, **{}**. I LOL'd._ 🤣 🤡", author.name),
            "https://i.imgur.com/6jr50Fp.gif",
        )
    } else {
        (
            format!("> _**{}** tickles_ {}", author.name, member.mention()),
            pick(TICKLE),
        )
    };
    let footer = format!(
        "{} tickled others: {sent} times so far.\n{} received: {received} tickles so far!",
        author.name,
        receiver_name(&ctx, &member)
    );
    send_gif(ctx, member_colour(&ctx, &member), Some(content), None, gif, footer).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_stays_in_bounds() {
        for _ in 0..100 {
            assert!(HUG.contains(&pick(HUG)));
            assert!(CRY_STRINGS.contains(&pick(CRY_STRINGS)));
        }
    }

    #[test]
    fn test_gif_lists_are_non_empty_links() {
        for list in [
            BAKA, BULLY, CRY, CUDDLE, FEED, HIGHFIVE, HUG, KISS, NOM, PAT, POKE, PUNCH,
            SLAP, SMUG, TICKLE,
        ] {
            assert!(!list.is_empty());
            assert!(list.iter().all(|url| url.starts_with("https://")));
        }
    }
}
